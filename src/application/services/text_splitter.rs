/// A window of source text together with its byte offset in the original.
#[derive(Debug, Clone, PartialEq)]
pub struct TextWindow {
    pub start: usize,
    pub text: String,
}

/// Splits text into fixed-size character windows with a fixed overlap, so
/// context survives across chunk boundaries. Stride is `size - overlap`;
/// start offsets increase strictly and the trailing `overlap` characters of
/// one window equal the leading `overlap` characters of the next.
#[derive(Debug, Clone)]
pub struct WindowSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl WindowSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        // A stride of zero would never advance.
        let chunk_overlap = chunk_overlap.min(chunk_size - 1);
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    pub fn split(&self, text: &str) -> Vec<TextWindow> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        // Windows are measured in characters but offsets reported in bytes,
        // so slicing always lands on UTF-8 boundaries.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(byte_offset, _)| byte_offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        let stride = self.chunk_size - self.chunk_overlap;
        let mut windows = Vec::new();
        let mut start_char = 0;

        while start_char < char_count {
            let end_char = (start_char + self.chunk_size).min(char_count);
            let start_byte = boundaries[start_char];
            let end_byte = boundaries[end_char];

            windows.push(TextWindow {
                start: start_byte,
                text: text[start_byte..end_byte].to_string(),
            });

            if end_char == char_count {
                break;
            }
            start_char += stride;
        }

        windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_window() {
        let splitter = WindowSplitter::new(100, 10);
        let windows = splitter.split("Short text");

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, 0);
        assert_eq!(windows[0].text, "Short text");
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let splitter = WindowSplitter::new(100, 10);
        assert!(splitter.split("").is_empty());
        assert!(splitter.split("   \n\t ").is_empty());
    }

    #[test]
    fn test_offsets_increase_and_overlaps_match() {
        // Roughly three pages of text, 500-char windows, 50-char overlap.
        let text = "The hydraulic pump must be primed before first use. "
            .repeat(120);
        let splitter = WindowSplitter::new(500, 50);
        let windows = splitter.split(&text);

        assert!(windows.len() > 1);
        for pair in windows.windows(2) {
            assert!(pair[1].start > pair[0].start, "offsets must increase");

            // The overlapping region must match byte-for-byte.
            let tail = &pair[0].text.as_bytes()[pair[0].text.len() - 50..];
            let head = &pair[1].text.as_bytes()[..50];
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_stride_is_size_minus_overlap() {
        let text = "a".repeat(1200);
        let splitter = WindowSplitter::new(500, 50);
        let windows = splitter.split(&text);

        assert_eq!(windows[0].start, 0);
        assert_eq!(windows[1].start, 450);
        assert_eq!(windows[2].start, 900);
    }

    #[test]
    fn test_windows_cover_entire_input() {
        let text = "0123456789".repeat(37);
        let splitter = WindowSplitter::new(100, 20);
        let windows = splitter.split(&text);

        let last = windows.last().unwrap();
        assert_eq!(last.start + last.text.len(), text.len());
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let text = "höher größer schöner ".repeat(40);
        let splitter = WindowSplitter::new(50, 10);
        let windows = splitter.split(&text);

        for window in &windows {
            // Would panic on a bad boundary; also verify offsets line up.
            assert_eq!(&text[window.start..window.start + window.text.len()], window.text);
        }
    }

    #[test]
    fn test_degenerate_overlap_clamped() {
        let splitter = WindowSplitter::new(10, 10);
        assert_eq!(splitter.chunk_overlap(), 9);

        let windows = splitter.split(&"x".repeat(30));
        assert!(windows.len() < 30);
    }
}

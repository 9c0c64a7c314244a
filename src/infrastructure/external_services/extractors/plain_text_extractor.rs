use async_trait::async_trait;

use crate::application::ports::text_extractor::{TextExtractionError, TextExtractor};

pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    fn can_extract(&self, content_type: &str, file_name: &str) -> bool {
        let content_type = content_type.to_lowercase();
        content_type.starts_with("text/plain")
            || content_type.starts_with("text/markdown")
            || file_name.to_lowercase().ends_with(".txt")
            || file_name.to_lowercase().ends_with(".md")
    }

    async fn extract_text(
        &self,
        data: &[u8],
        _content_type: &str,
        _file_name: &str,
    ) -> Result<String, TextExtractionError> {
        // Lossy decoding keeps mostly-valid files usable instead of failing
        // the whole upload on one bad byte.
        let text = String::from_utf8_lossy(data).to_string();
        if text.trim().is_empty() {
            return Err(TextExtractionError::EmptyDocument);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extracts_utf8() {
        let extractor = PlainTextExtractor::new();
        assert!(extractor.can_extract("text/plain", "notes.txt"));
        assert!(extractor.can_extract("application/octet-stream", "notes.md"));
        assert!(!extractor.can_extract("application/pdf", "manual.pdf"));

        let text = extractor
            .extract_text("hello world".as_bytes(), "text/plain", "notes.txt")
            .await
            .unwrap();
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn test_rejects_empty_content() {
        let extractor = PlainTextExtractor::new();
        let result = extractor.extract_text(b"  \n ", "text/plain", "x.txt").await;
        assert!(matches!(result, Err(TextExtractionError::EmptyDocument)));
    }
}

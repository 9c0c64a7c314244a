use async_trait::async_trait;
use html2text::from_read;

use crate::application::ports::text_extractor::{TextExtractionError, TextExtractor};

const TEXT_WIDTH: usize = 80;

pub struct HtmlExtractor;

impl HtmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for HtmlExtractor {
    fn can_extract(&self, content_type: &str, file_name: &str) -> bool {
        let content_type = content_type.to_lowercase();
        let file_name = file_name.to_lowercase();
        content_type.starts_with("text/html")
            || file_name.ends_with(".html")
            || file_name.ends_with(".htm")
    }

    async fn extract_text(
        &self,
        data: &[u8],
        _content_type: &str,
        _file_name: &str,
    ) -> Result<String, TextExtractionError> {
        let text = from_read(data, TEXT_WIDTH)
            .map_err(|e| TextExtractionError::ExtractionFailed(e.to_string()))?;

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
    async fn test_strips_markup() {
        let extractor = HtmlExtractor::new();
        let html = b"<html><body><h1>Safety</h1><p>Wear gloves when servicing.</p></body></html>";

        let text = extractor
            .extract_text(html, "text/html", "safety.html")
            .await
            .unwrap();

        assert!(text.contains("Safety"));
        assert!(text.contains("Wear gloves when servicing."));
        assert!(!text.contains("<p>"));
    }
}

use async_trait::async_trait;
use std::sync::Arc;

use super::{HtmlExtractor, PdfExtractor, PlainTextExtractor};
use crate::application::ports::text_extractor::{TextExtractionError, TextExtractor};

/// Routes each upload to the first extractor that claims its content type
/// or file extension.
pub struct CompositeExtractor {
    extractors: Vec<Arc<dyn TextExtractor>>,
}

impl CompositeExtractor {
    pub fn new() -> Self {
        Self {
            extractors: vec![
                Arc::new(PlainTextExtractor::new()),
                Arc::new(HtmlExtractor::new()),
                Arc::new(PdfExtractor::new()),
            ],
        }
    }

    fn extractor_for(
        &self,
        content_type: &str,
        file_name: &str,
    ) -> Option<&Arc<dyn TextExtractor>> {
        self.extractors
            .iter()
            .find(|e| e.can_extract(content_type, file_name))
    }
}

impl Default for CompositeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for CompositeExtractor {
    fn can_extract(&self, content_type: &str, file_name: &str) -> bool {
        self.extractor_for(content_type, file_name).is_some()
    }

    async fn extract_text(
        &self,
        data: &[u8],
        content_type: &str,
        file_name: &str,
    ) -> Result<String, TextExtractionError> {
        let extractor = self
            .extractor_for(content_type, file_name)
            .ok_or_else(|| TextExtractionError::UnsupportedFormat(content_type.to_string()))?;

        extractor.extract_text(data, content_type, file_name).await
    }
}

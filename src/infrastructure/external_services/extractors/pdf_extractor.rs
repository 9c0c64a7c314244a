use async_trait::async_trait;
use lopdf::Document;

use crate::application::ports::text_extractor::{TextExtractionError, TextExtractor};

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(doc: &Document) -> (String, Vec<String>) {
        let mut all_text = Vec::new();
        let mut errors = Vec::new();

        for (page_num, _) in doc.get_pages() {
            match doc.extract_text(&[page_num]) {
                Ok(text) => {
                    let lines: Vec<String> = text
                        .split('\n')
                        .map(|s| s.trim_end().to_string())
                        .filter(|s| !s.is_empty())
                        .collect();
                    all_text.extend(lines);
                }
                Err(e) => {
                    errors.push(format!("page {}: {}", page_num, e));
                }
            }
        }

        (all_text.join("\n"), errors)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    fn can_extract(&self, content_type: &str, file_name: &str) -> bool {
        content_type.to_lowercase() == "application/pdf"
            || file_name.to_lowercase().ends_with(".pdf")
    }

    async fn extract_text(
        &self,
        data: &[u8],
        _content_type: &str,
        file_name: &str,
    ) -> Result<String, TextExtractionError> {
        let doc = Document::load_mem(data)
            .map_err(|e| TextExtractionError::CorruptedFile(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(TextExtractionError::ExtractionFailed(
                "Encrypted PDFs are not supported".to_string(),
            ));
        }

        let (text, errors) = Self::extract_pages(&doc);

        if !errors.is_empty() {
            tracing::warn!(file_name, errors = errors.len(), "Some PDF pages failed to extract");
        }

        if text.trim().is_empty() {
            // Likely a scanned, image-only PDF.
            return Err(TextExtractionError::EmptyDocument);
        }

        Ok(text)
    }
}

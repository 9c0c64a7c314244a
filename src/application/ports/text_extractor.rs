use async_trait::async_trait;

#[derive(Debug)]
pub enum TextExtractionError {
    UnsupportedFormat(String),
    CorruptedFile(String),
    ExtractionFailed(String),
    EmptyDocument,
}

impl std::fmt::Display for TextExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextExtractionError::UnsupportedFormat(format) => {
                write!(f, "Unsupported format: {}", format)
            }
            TextExtractionError::CorruptedFile(msg) => write!(f, "Corrupted file: {}", msg),
            TextExtractionError::ExtractionFailed(msg) => write!(f, "Extraction failed: {}", msg),
            TextExtractionError::EmptyDocument => write!(f, "No text content in document"),
        }
    }
}

impl std::error::Error for TextExtractionError {}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    fn can_extract(&self, content_type: &str, file_name: &str) -> bool;

    async fn extract_text(
        &self,
        data: &[u8],
        content_type: &str,
        file_name: &str,
    ) -> Result<String, TextExtractionError>;
}

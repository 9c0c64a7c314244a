use async_trait::async_trait;

#[derive(Debug)]
pub enum SpeechError {
    NetworkError(String),
    ApiError(String),
    NoTranscript,
}

impl std::fmt::Display for SpeechError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeechError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            SpeechError::ApiError(msg) => write!(f, "API error: {}", msg),
            SpeechError::NoTranscript => write!(f, "No transcript in response"),
        }
    }
}

impl std::error::Error for SpeechError {}

#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, audio: &[u8], content_type: &str) -> Result<String, SpeechError>;
}

#[async_trait]
pub trait TextToSpeech: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError>;
}

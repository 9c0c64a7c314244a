use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::value_objects::PromptType;

#[derive(Debug)]
pub enum VoicePipelineError {
    TranscriptionError(String),
    CompletionError(String),
    SynthesisError(String),
    RetrievalError(String),
}

impl std::fmt::Display for VoicePipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoicePipelineError::TranscriptionError(msg) => {
                write!(f, "Transcription error: {}", msg)
            }
            VoicePipelineError::CompletionError(msg) => write!(f, "Completion error: {}", msg),
            VoicePipelineError::SynthesisError(msg) => write!(f, "Synthesis error: {}", msg),
            VoicePipelineError::RetrievalError(msg) => write!(f, "Retrieval error: {}", msg),
        }
    }
}

impl std::error::Error for VoicePipelineError {}

/// Binding negotiated at bootstrap time, before the WebSocket attaches.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub session_id: Uuid,
    pub equipment_id: Uuid,
    pub tenant_id: String,
    pub prompt_type: PromptType,
}

#[derive(Debug, Clone)]
pub enum TurnInput {
    Text(String),
    Audio { data: Vec<u8>, content_type: String },
}

#[derive(Debug, Clone)]
pub struct RetrievedSource {
    pub chunk_id: Uuid,
    pub document_id: Uuid,
    pub file_name: String,
    pub text: String,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct TurnOutput {
    /// STT result when the input was audio.
    pub transcript: Option<String>,
    pub reply_text: String,
    /// Synthesized speech for voice turns; None for text-only sessions.
    pub reply_audio: Option<Vec<u8>>,
    pub sources: Vec<RetrievedSource>,
}

/// One running conversation. Each connection owns exactly one handle; there is
/// no shared mutable state between handles.
#[async_trait]
pub trait SessionHandle: Send {
    fn session_id(&self) -> Uuid;

    /// Initial assistant greeting sent when the client attaches.
    async fn open_turn(&mut self) -> Result<TurnOutput, VoicePipelineError>;

    async fn handle_turn(&mut self, input: TurnInput) -> Result<TurnOutput, VoicePipelineError>;
}

/// Capability seam around the streaming/turn-taking machinery.
#[async_trait]
pub trait VoicePipeline: Send + Sync {
    async fn start_session(
        &self,
        config: SessionConfig,
    ) -> Result<Box<dyn SessionHandle>, VoicePipelineError>;
}

pub mod chat_provider;
pub mod embedding_provider;
pub mod speech;
pub mod text_extractor;
pub mod voice_pipeline;

pub use chat_provider::ChatProvider;
pub use embedding_provider::EmbeddingProvider;
pub use speech::{SpeechToText, TextToSpeech};
pub use text_extractor::TextExtractor;
pub use voice_pipeline::{SessionHandle, VoicePipeline};

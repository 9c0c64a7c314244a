pub mod chat_client;
pub mod embedding_client;
pub mod extractors;
pub mod speech;

pub use chat_client::{ChatClient, ChatClientConfig};
pub use embedding_client::{EmbeddingClient, EmbeddingClientConfig};
pub use speech::{DeepgramClient, ElevenLabsClient};

pub mod embedding_status;
pub mod prompt_type;

pub use embedding_status::EmbeddingStatus;
pub use prompt_type::PromptType;

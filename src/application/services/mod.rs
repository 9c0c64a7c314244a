pub mod ingestion_service;
pub mod prompt_service;
pub mod retrieval_service;
pub mod session_registry;
pub mod text_splitter;

pub use ingestion_service::IngestionService;
pub use prompt_service::PromptService;
pub use retrieval_service::RetrievalService;
pub use session_registry::SessionRegistry;
pub use text_splitter::WindowSplitter;

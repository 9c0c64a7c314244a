pub mod document;
pub mod document_chunk;
pub mod equipment;
pub mod session;

pub use document::Document;
pub use document_chunk::DocumentChunk;
pub use equipment::Equipment;
pub use session::Session;

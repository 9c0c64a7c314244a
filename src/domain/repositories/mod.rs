pub mod chunk_repository;
pub mod document_repository;
pub mod equipment_repository;

pub use chunk_repository::{ChunkRepository, ScoredChunk};
pub use document_repository::DocumentRepository;
pub use equipment_repository::EquipmentRepository;

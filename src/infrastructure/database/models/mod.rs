pub mod chunk_model;
pub mod document_model;
pub mod equipment_model;

pub use chunk_model::{DocumentChunkModel, NewDocumentChunkModel};
pub use document_model::{DocumentModel, NewDocumentModel};
pub use equipment_model::{EquipmentModel, NewEquipmentModel};

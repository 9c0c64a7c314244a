pub mod document_handler;
pub mod equipment_handler;
pub mod retrieval_handler;
pub mod session_handler;

pub use document_handler::DocumentHandler;
pub use equipment_handler::EquipmentHandler;
pub use retrieval_handler::RetrievalHandler;
pub use session_handler::SessionHandler;

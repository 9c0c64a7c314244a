pub mod create_equipment;
pub mod delete_equipment;
pub mod get_equipment;
pub mod list_documents;
pub mod list_equipment;
pub mod open_session;
pub mod retrieve_context;
pub mod upload_documents;

pub use create_equipment::CreateEquipmentUseCase;
pub use delete_equipment::DeleteEquipmentUseCase;
pub use get_equipment::GetEquipmentUseCase;
pub use list_documents::ListDocumentsUseCase;
pub use list_equipment::ListEquipmentUseCase;
pub use open_session::OpenSessionUseCase;
pub use retrieve_context::RetrieveContextUseCase;
pub use upload_documents::UploadDocumentsUseCase;

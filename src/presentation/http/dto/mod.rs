pub mod document_dto;
pub mod equipment_dto;
pub mod response_dto;
pub mod retrieval_dto;
pub mod session_dto;

pub use document_dto::{DocumentListResponseDto, DocumentResponseDto, UploadDocumentsResponseDto};
pub use equipment_dto::{
    CreateEquipmentDto, DeleteEquipmentResponseDto, EquipmentListResponseDto, EquipmentResponseDto,
};
pub use response_dto::{ApiError, ApiResponse, HealthResponseDto};
pub use retrieval_dto::{RetrievalRequestDto, RetrievalResponseDto, RetrievedChunkDto};
pub use session_dto::{ClientEvent, ConnectRequestDto, ConnectResponseDto, ServerEvent, SourceDto};

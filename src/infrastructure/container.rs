use std::sync::Arc;

use crate::{
    application::{
        ports::{ChatProvider, EmbeddingProvider, TextExtractor, VoicePipeline},
        services::{
            IngestionService, PromptService, RetrievalService, SessionRegistry, WindowSplitter,
        },
        use_cases::{
            CreateEquipmentUseCase, DeleteEquipmentUseCase, GetEquipmentUseCase,
            ListDocumentsUseCase, ListEquipmentUseCase, OpenSessionUseCase,
            RetrieveContextUseCase, UploadDocumentsUseCase,
        },
    },
    config::Settings,
    domain::repositories::{ChunkRepository, DocumentRepository, EquipmentRepository},
    infrastructure::{
        database::{
            create_connection_pool, get_connection_from_pool,
            repositories::{
                PostgresChunkRepository, PostgresDocumentRepository, PostgresEquipmentRepository,
            },
            run_migrations,
        },
        external_services::{
            ChatClient, ChatClientConfig, DeepgramClient, ElevenLabsClient, EmbeddingClient,
            EmbeddingClientConfig, extractors::CompositeExtractor,
        },
        voice::RagVoicePipeline,
    },
    presentation::http::handlers::{
        DocumentHandler, EquipmentHandler, RetrievalHandler, SessionHandler,
    },
};

pub struct AppContainer {
    // Repositories
    pub equipment_repository: Arc<dyn EquipmentRepository>,
    pub document_repository: Arc<dyn DocumentRepository>,
    pub chunk_repository: Arc<dyn ChunkRepository>,

    // External Services
    pub embedding_provider: Arc<dyn EmbeddingProvider>,
    pub chat_provider: Arc<dyn ChatProvider>,
    pub text_extractor: Arc<dyn TextExtractor>,

    // Application Services
    pub ingestion_service: Arc<IngestionService>,
    pub retrieval_service: Arc<RetrievalService>,
    pub prompt_service: Arc<PromptService>,
    pub session_registry: Arc<SessionRegistry>,
    pub voice_pipeline: Arc<dyn VoicePipeline>,

    // Use Cases
    pub create_equipment_use_case: Arc<CreateEquipmentUseCase>,
    pub list_equipment_use_case: Arc<ListEquipmentUseCase>,
    pub get_equipment_use_case: Arc<GetEquipmentUseCase>,
    pub delete_equipment_use_case: Arc<DeleteEquipmentUseCase>,
    pub upload_documents_use_case: Arc<UploadDocumentsUseCase>,
    pub list_documents_use_case: Arc<ListDocumentsUseCase>,
    pub retrieve_context_use_case: Arc<RetrieveContextUseCase>,
    pub open_session_use_case: Arc<OpenSessionUseCase>,

    // HTTP Handlers
    pub equipment_handler: Arc<EquipmentHandler>,
    pub document_handler: Arc<DocumentHandler>,
    pub retrieval_handler: Arc<RetrievalHandler>,
    pub session_handler: Arc<SessionHandler>,
}

impl AppContainer {
    pub async fn new(settings: &Settings) -> Result<Self, Box<dyn std::error::Error>> {
        // Database pool and migrations
        let db_pool = create_connection_pool(&settings.database_url)?;
        let mut conn = get_connection_from_pool(&db_pool)
            .map_err(|e| format!("Failed to get database connection: {}", e))?;
        run_migrations(&mut conn).map_err(|e| format!("Failed to run migrations: {}", e))?;
        drop(conn);

        // Repositories
        let equipment_repository: Arc<dyn EquipmentRepository> =
            Arc::new(PostgresEquipmentRepository::new(db_pool.clone()));
        let document_repository: Arc<dyn DocumentRepository> =
            Arc::new(PostgresDocumentRepository::new(db_pool.clone()));
        let chunk_repository: Arc<dyn ChunkRepository> =
            Arc::new(PostgresChunkRepository::new(db_pool));

        // External services
        let embedding_provider: Arc<dyn EmbeddingProvider> =
            Arc::new(EmbeddingClient::new(EmbeddingClientConfig::new(
                settings.embeddings_service_url.clone(),
                settings.embedding_model.clone(),
                settings.embedding_dimension,
            ))?);

        let chat_provider: Arc<dyn ChatProvider> = Arc::new(ChatClient::new(
            ChatClientConfig::new(
                settings.llm_base_url.clone(),
                settings.llm_api_key.clone(),
                settings.llm_model.clone(),
            ),
        )?);

        let text_extractor: Arc<dyn TextExtractor> = Arc::new(CompositeExtractor::new());

        // Speech services are optional; text-only deployments leave the
        // keys unset.
        let speech_to_text = if settings.deepgram_api_key.is_empty() {
            None
        } else {
            Some(Arc::new(DeepgramClient::new(settings.deepgram_api_key.clone())?)
                as Arc<dyn crate::application::ports::SpeechToText>)
        };
        let text_to_speech = if settings.elevenlabs_api_key.is_empty() {
            None
        } else {
            Some(Arc::new(ElevenLabsClient::new(
                settings.elevenlabs_api_key.clone(),
                settings.elevenlabs_voice_id.clone(),
            )?) as Arc<dyn crate::application::ports::TextToSpeech>)
        };

        // Application services
        let splitter = WindowSplitter::new(settings.chunk_size, settings.chunk_overlap);
        let ingestion_service = Arc::new(IngestionService::new(
            text_extractor.clone(),
            embedding_provider.clone(),
            document_repository.clone(),
            chunk_repository.clone(),
            splitter,
        ));

        let retrieval_service = Arc::new(RetrievalService::new(
            embedding_provider.clone(),
            chunk_repository.clone(),
            settings.retrieval_top_k,
            settings.retrieval_min_score,
        ));

        let prompt_service = Arc::new(PromptService::new());
        let session_registry = Arc::new(SessionRegistry::new());

        let voice_pipeline: Arc<dyn VoicePipeline> = Arc::new(RagVoicePipeline::new(
            equipment_repository.clone(),
            retrieval_service.clone(),
            prompt_service.clone(),
            chat_provider.clone(),
            speech_to_text,
            text_to_speech,
        ));

        // Use cases
        let create_equipment_use_case =
            Arc::new(CreateEquipmentUseCase::new(equipment_repository.clone()));
        let list_equipment_use_case =
            Arc::new(ListEquipmentUseCase::new(equipment_repository.clone()));
        let get_equipment_use_case =
            Arc::new(GetEquipmentUseCase::new(equipment_repository.clone()));
        let delete_equipment_use_case = Arc::new(DeleteEquipmentUseCase::new(
            equipment_repository.clone(),
            document_repository.clone(),
            chunk_repository.clone(),
        ));
        let upload_documents_use_case = Arc::new(UploadDocumentsUseCase::new(
            equipment_repository.clone(),
            document_repository.clone(),
            ingestion_service.clone(),
        ));
        let list_documents_use_case = Arc::new(ListDocumentsUseCase::new(
            equipment_repository.clone(),
            document_repository.clone(),
        ));
        let retrieve_context_use_case = Arc::new(RetrieveContextUseCase::new(
            equipment_repository.clone(),
            retrieval_service.clone(),
        ));
        let open_session_use_case = Arc::new(OpenSessionUseCase::new(
            equipment_repository.clone(),
            session_registry.clone(),
        ));

        // HTTP handlers
        let equipment_handler = Arc::new(EquipmentHandler::new(
            create_equipment_use_case.clone(),
            list_equipment_use_case.clone(),
            get_equipment_use_case.clone(),
            delete_equipment_use_case.clone(),
            settings.default_tenant_id.clone(),
        ));

        let document_handler = Arc::new(DocumentHandler::new(
            upload_documents_use_case.clone(),
            list_documents_use_case.clone(),
            settings.default_user_id.clone(),
        ));

        let retrieval_handler = Arc::new(RetrievalHandler::new(retrieve_context_use_case.clone()));

        let session_handler = Arc::new(SessionHandler::new(
            open_session_use_case.clone(),
            session_registry.clone(),
            voice_pipeline.clone(),
            settings.public_base_url.clone(),
        ));

        Ok(Self {
            equipment_repository,
            document_repository,
            chunk_repository,
            embedding_provider,
            chat_provider,
            text_extractor,
            ingestion_service,
            retrieval_service,
            prompt_service,
            session_registry,
            voice_pipeline,
            create_equipment_use_case,
            list_equipment_use_case,
            get_equipment_use_case,
            delete_equipment_use_case,
            upload_documents_use_case,
            list_documents_use_case,
            retrieve_context_use_case,
            open_session_use_case,
            equipment_handler,
            document_handler,
            retrieval_handler,
            session_handler,
        })
    }
}

use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::application::ports::{EmbeddingProvider, TextExtractor};
use crate::application::services::text_splitter::WindowSplitter;
use crate::domain::entities::{Document, DocumentChunk, Equipment};
use crate::domain::repositories::{
    ChunkRepository, DocumentRepository, document_repository::DocumentRepositoryError,
};

#[derive(Debug)]
pub enum IngestionError {
    RepositoryError(String),
    /// The equipment already holds this exact file content.
    DuplicateDocument,
}

impl std::fmt::Display for IngestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestionError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            IngestionError::DuplicateDocument => write!(f, "Duplicate document content"),
        }
    }
}

impl std::error::Error for IngestionError {}

/// Collapse runs of blank lines so page breaks and layout padding do not
/// eat chunk windows.
fn normalize_text(text: &str) -> String {
    static BLANK_RUNS: OnceLock<Regex> = OnceLock::new();
    let re = BLANK_RUNS.get_or_init(|| Regex::new(r"\n{3,}").unwrap_or_else(|_| unreachable!()));
    re.replace_all(text.trim(), "\n\n").into_owned()
}

/// Extract → split into overlapping windows → embed → persist chunks.
///
/// Every accepted upload gets a document row, and that row always ends in a
/// terminal state: `completed` when every chunk embedded and saved,
/// `failed` otherwise. A single chunk that fails to embed fails the whole
/// document; no partial chunk sets are ever persisted.
pub struct IngestionService {
    text_extractor: Arc<dyn TextExtractor>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    document_repository: Arc<dyn DocumentRepository>,
    chunk_repository: Arc<dyn ChunkRepository>,
    splitter: WindowSplitter,
}

impl IngestionService {
    pub fn new(
        text_extractor: Arc<dyn TextExtractor>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        document_repository: Arc<dyn DocumentRepository>,
        chunk_repository: Arc<dyn ChunkRepository>,
        splitter: WindowSplitter,
    ) -> Self {
        Self {
            text_extractor,
            embedding_provider,
            document_repository,
            chunk_repository,
            splitter,
        }
    }

    /// Ingest one uploaded file into the equipment's knowledge base.
    ///
    /// Returns the document with its final embedding status. `Err` is
    /// reserved for infrastructure failures where no status could be
    /// recorded at all; extraction/embedding problems come back as
    /// `Ok(document)` with a failed status.
    pub async fn ingest_file(
        &self,
        equipment: &Equipment,
        file_name: &str,
        content_type: &str,
        data: &[u8],
        description: Option<String>,
        uploaded_by: &str,
        content_hash: &str,
    ) -> Result<Document, IngestionError> {
        let mut document = Document::new(
            equipment.id(),
            equipment.tenant_id().to_string(),
            file_name.to_string(),
            content_type.to_string(),
            data.len() as i64,
            description,
            uploaded_by.to_string(),
            content_hash.to_string(),
        );

        self.document_repository
            .save(&document)
            .await
            .map_err(|e| match e {
                DocumentRepositoryError::DuplicateContent => IngestionError::DuplicateDocument,
                e => IngestionError::RepositoryError(e.to_string()),
            })?;

        if !self.text_extractor.can_extract(content_type, file_name) {
            tracing::warn!(
                document_id = %document.id(),
                content_type,
                "Rejecting unsupported upload"
            );
            return self
                .fail(document, format!("Unsupported content type: {}", content_type))
                .await;
        }

        if let Err(e) = document.start_processing() {
            return self.fail(document, e).await;
        }
        self.document_repository
            .update_status(&document)
            .await
            .map_err(|e| IngestionError::RepositoryError(e.to_string()))?;

        let text = match self
            .text_extractor
            .extract_text(data, content_type, file_name)
            .await
        {
            Ok(text) if !text.trim().is_empty() => normalize_text(&text),
            Ok(_) => {
                return self
                    .fail(document, "No text content extracted".to_string())
                    .await;
            }
            Err(e) => {
                tracing::error!(document_id = %document.id(), error = %e, "Text extraction failed");
                return self.fail(document, format!("Text extraction failed: {}", e)).await;
            }
        };

        let windows = self.splitter.split(&text);
        if windows.is_empty() {
            return self
                .fail(document, "Text splitting produced no chunks".to_string())
                .await;
        }

        let texts: Vec<String> = windows.iter().map(|w| w.text.clone()).collect();
        let embeddings = match self.embedding_provider.embed_batch(&texts).await {
            Ok(embeddings) if embeddings.len() == windows.len() => embeddings,
            Ok(embeddings) => {
                // The provider silently dropped inputs; treat as a full failure
                // rather than persisting an incomplete chunk set.
                tracing::error!(
                    document_id = %document.id(),
                    expected = windows.len(),
                    got = embeddings.len(),
                    "Embedding count mismatch"
                );
                return self
                    .fail(document, "Failed to embed all chunks".to_string())
                    .await;
            }
            Err(e) => {
                tracing::error!(document_id = %document.id(), error = %e, "Embedding failed");
                return self.fail(document, format!("Embedding failed: {}", e)).await;
            }
        };

        // A wrong-length vector would be rejected by the vector column at
        // insert time; catch it here so the document fails cleanly.
        let expected_dimension = self.embedding_provider.embedding_dimension();
        if embeddings
            .iter()
            .any(|e| e.as_slice().len() != expected_dimension)
        {
            tracing::error!(
                document_id = %document.id(),
                expected_dimension,
                "Embedding dimension mismatch"
            );
            return self
                .fail(
                    document,
                    format!(
                        "Embedding dimension mismatch: expected {}",
                        expected_dimension
                    ),
                )
                .await;
        }

        let chunks: Vec<DocumentChunk> = windows
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(index, (window, embedding))| {
                DocumentChunk::new(
                    &document,
                    index as i32,
                    window.start as i32,
                    window.text,
                    embedding,
                )
            })
            .collect();

        if let Err(e) = self.chunk_repository.save_batch(&chunks).await {
            return self.fail(document, format!("Failed to persist chunks: {}", e)).await;
        }

        if let Err(e) = document.complete_processing() {
            return self.fail(document, e).await;
        }
        self.document_repository
            .update_status(&document)
            .await
            .map_err(|e| IngestionError::RepositoryError(e.to_string()))?;

        tracing::info!(
            document_id = %document.id(),
            chunks = chunks.len(),
            "Document ingestion completed"
        );

        Ok(document)
    }

    async fn fail(
        &self,
        mut document: Document,
        error: String,
    ) -> Result<Document, IngestionError> {
        if document.fail_processing(error).is_ok() {
            self.document_repository
                .update_status(&document)
                .await
                .map_err(|e| IngestionError::RepositoryError(e.to_string()))?;
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pgvector::Vector;
    use std::sync::Mutex;
    use uuid::Uuid;

    use crate::application::ports::embedding_provider::EmbeddingProviderError;
    use crate::application::ports::text_extractor::TextExtractionError;
    use crate::domain::repositories::chunk_repository::{ChunkRepositoryError, ScoredChunk};
    use crate::domain::repositories::document_repository::DocumentRepositoryError;

    struct FakeExtractor;

    #[async_trait]
    impl TextExtractor for FakeExtractor {
        fn can_extract(&self, content_type: &str, _file_name: &str) -> bool {
            content_type == "text/plain"
        }

        async fn extract_text(
            &self,
            data: &[u8],
            content_type: &str,
            _file_name: &str,
        ) -> Result<String, TextExtractionError> {
            if content_type != "text/plain" {
                return Err(TextExtractionError::UnsupportedFormat(
                    content_type.to_string(),
                ));
            }
            Ok(String::from_utf8_lossy(data).to_string())
        }
    }

    struct FakeEmbedder {
        fail: bool,
    }

    #[async_trait]
    impl EmbeddingProvider for FakeEmbedder {
        async fn embed_text(&self, _text: &str) -> Result<Vector, EmbeddingProviderError> {
            if self.fail {
                return Err(EmbeddingProviderError::ServiceUnavailable);
            }
            Ok(Vector::from(vec![0.5, 0.5]))
        }

        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> Result<Vec<Vector>, EmbeddingProviderError> {
            if self.fail {
                return Err(EmbeddingProviderError::ServiceUnavailable);
            }
            Ok(texts.iter().map(|_| Vector::from(vec![0.5, 0.5])).collect())
        }

        fn embedding_dimension(&self) -> usize {
            2
        }
    }

    /// Declares a wider dimension than the vectors it returns.
    struct NarrowEmbedder;

    #[async_trait]
    impl EmbeddingProvider for NarrowEmbedder {
        async fn embed_text(&self, _text: &str) -> Result<Vector, EmbeddingProviderError> {
            Ok(Vector::from(vec![0.5, 0.5]))
        }

        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> Result<Vec<Vector>, EmbeddingProviderError> {
            Ok(texts.iter().map(|_| Vector::from(vec![0.5, 0.5])).collect())
        }

        fn embedding_dimension(&self) -> usize {
            3
        }
    }

    #[derive(Default)]
    struct InMemoryDocuments {
        statuses: Mutex<Vec<(Uuid, String)>>,
    }

    #[async_trait]
    impl DocumentRepository for InMemoryDocuments {
        async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
            self.statuses
                .lock()
                .unwrap()
                .push((document.id(), document.embedding_status().to_string()));
            Ok(())
        }

        async fn update_status(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
            self.statuses
                .lock()
                .unwrap()
                .push((document.id(), document.embedding_status().to_string()));
            Ok(())
        }

        async fn find_by_id(
            &self,
            _document_id: Uuid,
        ) -> Result<Option<Document>, DocumentRepositoryError> {
            Ok(None)
        }

        async fn find_by_equipment_and_hash(
            &self,
            _equipment_id: Uuid,
            _content_hash: &str,
        ) -> Result<Option<Document>, DocumentRepositoryError> {
            Ok(None)
        }

        async fn list_by_equipment(
            &self,
            _equipment_id: Uuid,
        ) -> Result<Vec<Document>, DocumentRepositoryError> {
            Ok(Vec::new())
        }

        async fn delete_by_equipment(
            &self,
            _equipment_id: Uuid,
        ) -> Result<usize, DocumentRepositoryError> {
            Ok(0)
        }
    }

    #[derive(Default)]
    struct InMemoryChunks {
        saved: Mutex<Vec<DocumentChunk>>,
    }

    #[async_trait]
    impl ChunkRepository for InMemoryChunks {
        async fn save_batch(&self, chunks: &[DocumentChunk]) -> Result<(), ChunkRepositoryError> {
            self.saved.lock().unwrap().extend_from_slice(chunks);
            Ok(())
        }

        async fn similarity_search(
            &self,
            _query_embedding: &Vector,
            _tenant_id: &str,
            _equipment_id: Uuid,
            _k: i64,
        ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError> {
            Ok(Vec::new())
        }

        async fn delete_by_equipment(
            &self,
            _equipment_id: Uuid,
        ) -> Result<usize, ChunkRepositoryError> {
            Ok(0)
        }
    }

    fn service(fail_embeddings: bool, chunks: Arc<InMemoryChunks>) -> IngestionService {
        IngestionService::new(
            Arc::new(FakeExtractor),
            Arc::new(FakeEmbedder {
                fail: fail_embeddings,
            }),
            Arc::new(InMemoryDocuments::default()),
            chunks,
            WindowSplitter::new(50, 10),
        )
    }

    fn equipment() -> Equipment {
        Equipment::new("tenant-a".to_string(), "Press B7".to_string(), None)
    }

    #[tokio::test]
    async fn test_chunks_inherit_document_scope() {
        let chunks = Arc::new(InMemoryChunks::default());
        let service = service(false, chunks.clone());
        let equipment = equipment();

        let text = "The press requires a warm-up cycle of ten minutes. ".repeat(5);
        let document = service
            .ingest_file(
                &equipment,
                "warmup.txt",
                "text/plain",
                text.as_bytes(),
                None,
                "mvp_user",
                "hash-warmup",
            )
            .await
            .unwrap();

        assert!(document.embedding_status().is_completed());

        let saved = chunks.saved.lock().unwrap();
        assert!(!saved.is_empty());
        for (i, chunk) in saved.iter().enumerate() {
            assert_eq!(chunk.document_id(), document.id());
            assert_eq!(chunk.equipment_id(), equipment.id());
            assert_eq!(chunk.tenant_id(), equipment.tenant_id());
            assert_eq!(chunk.chunk_index(), i as i32);
        }
    }

    #[tokio::test]
    async fn test_unsupported_type_ends_failed() {
        let chunks = Arc::new(InMemoryChunks::default());
        let service = service(false, chunks.clone());

        let document = service
            .ingest_file(
                &equipment(),
                "photo.png",
                "image/png",
                b"not text",
                None,
                "mvp_user",
                "hash-photo",
            )
            .await
            .unwrap();

        assert!(document.embedding_status().is_failed());
        assert!(document.embedding_status().is_terminal());
        assert!(chunks.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_embedding_failure_fails_whole_document() {
        let chunks = Arc::new(InMemoryChunks::default());
        let service = service(true, chunks.clone());

        let text = "Relief valve settings are listed in table four. ".repeat(10);
        let document = service
            .ingest_file(
                &equipment(),
                "valves.txt",
                "text/plain",
                text.as_bytes(),
                None,
                "mvp_user",
                "hash-valves",
            )
            .await
            .unwrap();

        assert!(document.embedding_status().is_failed());
        // No partial chunk set may survive a failed embedding run.
        assert!(chunks.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_document_fails() {
        let chunks = Arc::new(InMemoryChunks::default());
        let service = service(false, chunks);

        let document = service
            .ingest_file(
                &equipment(),
                "empty.txt",
                "text/plain",
                b"   ",
                None,
                "mvp_user",
                "hash-empty",
            )
            .await
            .unwrap();

        assert!(document.embedding_status().is_failed());
    }

    #[tokio::test]
    async fn test_dimension_mismatch_fails_document() {
        let chunks = Arc::new(InMemoryChunks::default());
        let service = IngestionService::new(
            Arc::new(FakeExtractor),
            Arc::new(NarrowEmbedder),
            Arc::new(InMemoryDocuments::default()),
            chunks.clone(),
            WindowSplitter::new(50, 10),
        );

        let text = "Grease the spindle bearings every forty hours. ".repeat(5);
        let document = service
            .ingest_file(
                &equipment(),
                "spindle.txt",
                "text/plain",
                text.as_bytes(),
                None,
                "mvp_user",
                "hash-spindle",
            )
            .await
            .unwrap();

        assert!(document.embedding_status().is_failed());
        assert!(chunks.saved.lock().unwrap().is_empty());
    }

    #[test]
    fn test_normalize_collapses_blank_runs() {
        let text = "page one\n\n\n\n\npage two\n\nkept\n";
        assert_eq!(normalize_text(text), "page one\n\npage two\n\nkept");
    }
}

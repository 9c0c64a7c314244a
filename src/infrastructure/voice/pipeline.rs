use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::chat_provider::{ChatMessage, ChatProvider};
use crate::application::ports::speech::{SpeechToText, TextToSpeech};
use crate::application::ports::voice_pipeline::{
    RetrievedSource, SessionConfig, SessionHandle, TurnInput, TurnOutput, VoicePipeline,
    VoicePipelineError,
};
use crate::application::services::{PromptService, RetrievalService};
use crate::domain::entities::Session;
use crate::domain::entities::session::TurnRole;
use crate::domain::repositories::EquipmentRepository;

/// Retrieval-augmented conversation pipeline. Each turn embeds the query,
/// pulls the nearest chunks for the session's equipment, and feeds them to
/// the model together with the running history.
pub struct RagVoicePipeline {
    equipment_repository: Arc<dyn EquipmentRepository>,
    retrieval_service: Arc<RetrievalService>,
    prompt_service: Arc<PromptService>,
    chat_provider: Arc<dyn ChatProvider>,
    speech_to_text: Option<Arc<dyn SpeechToText>>,
    text_to_speech: Option<Arc<dyn TextToSpeech>>,
}

impl RagVoicePipeline {
    pub fn new(
        equipment_repository: Arc<dyn EquipmentRepository>,
        retrieval_service: Arc<RetrievalService>,
        prompt_service: Arc<PromptService>,
        chat_provider: Arc<dyn ChatProvider>,
        speech_to_text: Option<Arc<dyn SpeechToText>>,
        text_to_speech: Option<Arc<dyn TextToSpeech>>,
    ) -> Self {
        Self {
            equipment_repository,
            retrieval_service,
            prompt_service,
            chat_provider,
            speech_to_text,
            text_to_speech,
        }
    }
}

#[async_trait]
impl VoicePipeline for RagVoicePipeline {
    async fn start_session(
        &self,
        config: SessionConfig,
    ) -> Result<Box<dyn SessionHandle>, VoicePipelineError> {
        let equipment = self
            .equipment_repository
            .find_by_id(config.equipment_id)
            .await
            .map_err(|e| VoicePipelineError::RetrievalError(e.to_string()))?
            .ok_or_else(|| {
                VoicePipelineError::RetrievalError(format!(
                    "Equipment not found: {}",
                    config.equipment_id
                ))
            })?;

        let session = Session::new(
            config.session_id,
            config.equipment_id,
            config.tenant_id,
            config.prompt_type,
        );

        Ok(Box::new(RagSessionHandle {
            session,
            equipment_name: equipment.name().to_string(),
            retrieval_service: self.retrieval_service.clone(),
            prompt_service: self.prompt_service.clone(),
            chat_provider: self.chat_provider.clone(),
            speech_to_text: self.speech_to_text.clone(),
            text_to_speech: self.text_to_speech.clone(),
        }))
    }
}

pub struct RagSessionHandle {
    session: Session,
    equipment_name: String,
    retrieval_service: Arc<RetrievalService>,
    prompt_service: Arc<PromptService>,
    chat_provider: Arc<dyn ChatProvider>,
    speech_to_text: Option<Arc<dyn SpeechToText>>,
    text_to_speech: Option<Arc<dyn TextToSpeech>>,
}

impl RagSessionHandle {
    async fn synthesize(&self, text: &str) -> Option<Vec<u8>> {
        let tts = self.text_to_speech.as_ref()?;
        match tts.synthesize(text).await {
            Ok(audio) => Some(audio),
            Err(e) => {
                // A lost voice reply still leaves the text reply usable.
                tracing::warn!(session_id = %self.session.id(), error = %e, "Speech synthesis failed");
                None
            }
        }
    }

    fn history_messages(&self) -> Vec<ChatMessage> {
        self.session
            .history()
            .iter()
            .map(|turn| match turn.role {
                TurnRole::User => ChatMessage::user(turn.content.clone()),
                TurnRole::Assistant => ChatMessage::assistant(turn.content.clone()),
            })
            .collect()
    }
}

#[async_trait]
impl SessionHandle for RagSessionHandle {
    fn session_id(&self) -> Uuid {
        self.session.id()
    }

    async fn open_turn(&mut self) -> Result<TurnOutput, VoicePipelineError> {
        let greeting = self
            .prompt_service
            .greeting(self.session.prompt_type(), &self.equipment_name);

        self.session.record_assistant_turn(greeting.clone());

        let reply_audio = self.synthesize(&greeting).await;

        Ok(TurnOutput {
            transcript: None,
            reply_text: greeting,
            reply_audio,
            sources: Vec::new(),
        })
    }

    async fn handle_turn(&mut self, input: TurnInput) -> Result<TurnOutput, VoicePipelineError> {
        let (query, transcript) = match input {
            TurnInput::Text(text) => (text, None),
            TurnInput::Audio { data, content_type } => {
                let stt = self.speech_to_text.as_ref().ok_or_else(|| {
                    VoicePipelineError::TranscriptionError(
                        "Speech-to-text is not configured".to_string(),
                    )
                })?;
                let transcript = stt
                    .transcribe(&data, &content_type)
                    .await
                    .map_err(|e| VoicePipelineError::TranscriptionError(e.to_string()))?;
                (transcript.clone(), Some(transcript))
            }
        };

        let results = self
            .retrieval_service
            .retrieve(&query, self.session.tenant_id(), self.session.equipment_id())
            .await
            .map_err(|e| VoicePipelineError::RetrievalError(e.to_string()))?;

        let context = RetrievalService::format_context(&results);
        let system_prompt = self.prompt_service.system_prompt(
            self.session.prompt_type(),
            &self.equipment_name,
            &context,
        );

        let mut messages = vec![ChatMessage::system(system_prompt)];
        messages.extend(self.history_messages());
        messages.push(ChatMessage::user(query.clone()));

        let reply_text = self
            .chat_provider
            .complete(&messages)
            .await
            .map_err(|e| VoicePipelineError::CompletionError(e.to_string()))?;

        self.session.record_user_turn(query);
        self.session.record_assistant_turn(reply_text.clone());

        // Voice turns get a voice reply; text turns stay text only.
        let reply_audio = if transcript.is_some() {
            self.synthesize(&reply_text).await
        } else {
            None
        };

        let sources = results
            .into_iter()
            .map(|scored| RetrievedSource {
                chunk_id: scored.chunk.id(),
                document_id: scored.chunk.document_id(),
                file_name: scored.chunk.file_name().to_string(),
                text: scored.chunk.chunk_text().to_string(),
                score: scored.score,
            })
            .collect();

        Ok(TurnOutput {
            transcript,
            reply_text,
            reply_audio,
            sources,
        })
    }
}

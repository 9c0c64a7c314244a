use axum::{
    Json,
    extract::{
        Path, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::voice_pipeline::{TurnInput, TurnOutput, VoicePipeline};
use crate::application::services::SessionRegistry;
use crate::application::use_cases::{
    OpenSessionUseCase,
    open_session::{OpenSessionError, OpenSessionRequest},
};
use crate::presentation::http::dto::{
    ApiResponse, ClientEvent, ConnectRequestDto, ConnectResponseDto, ServerEvent,
};

pub struct SessionHandler {
    open_session_use_case: Arc<OpenSessionUseCase>,
    session_registry: Arc<SessionRegistry>,
    voice_pipeline: Arc<dyn VoicePipeline>,
    public_base_url: String,
}

impl SessionHandler {
    pub fn new(
        open_session_use_case: Arc<OpenSessionUseCase>,
        session_registry: Arc<SessionRegistry>,
        voice_pipeline: Arc<dyn VoicePipeline>,
        public_base_url: String,
    ) -> Self {
        Self {
            open_session_use_case,
            session_registry,
            voice_pipeline,
            public_base_url,
        }
    }

    fn websocket_url(&self, path: &str) -> String {
        let base = self
            .public_base_url
            .replacen("https://", "wss://", 1)
            .replacen("http://", "ws://", 1);
        format!("{}{}", base.trim_end_matches('/'), path)
    }

    pub async fn connect(
        State(handler): State<Arc<SessionHandler>>,
        Json(body): Json<ConnectRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = OpenSessionRequest {
            equipment_id: body.equipment_id,
            tenant_id: body.tenant_id,
            prompt_type: body.prompt_type,
        };

        match handler.open_session_use_case.execute(request).await {
            Ok(response) => {
                let dto = ConnectResponseDto {
                    session_id: response.session_id,
                    equipment_id: response.equipment_id,
                    prompt_type: response.prompt_type.as_str().to_string(),
                    websocket_url: handler.websocket_url(&response.websocket_path),
                };
                Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
            }
            Err(OpenSessionError::EquipmentNotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "EQUIPMENT_NOT_FOUND".to_string(),
                    format!("Equipment not found: {}", id),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "CONNECT_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn websocket(
        State(handler): State<Arc<SessionHandler>>,
        Path(session_id): Path<Uuid>,
        ws: WebSocketUpgrade,
    ) -> Result<impl IntoResponse, StatusCode> {
        // Claiming consumes the registration; a second connection with the
        // same session id is turned away here.
        let config = handler
            .session_registry
            .take(session_id)
            .ok_or(StatusCode::NOT_FOUND)?;

        let pipeline = handler.voice_pipeline.clone();
        Ok(ws.on_upgrade(move |socket| run_session(socket, pipeline, config)))
    }
}

async fn run_session(
    mut socket: WebSocket,
    pipeline: Arc<dyn VoicePipeline>,
    config: crate::application::ports::voice_pipeline::SessionConfig,
) {
    let session_id = config.session_id;

    let mut handle = match pipeline.start_session(config).await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(%session_id, error = %e, "Failed to start session");
            let _ = send_event(
                &mut socket,
                &ServerEvent::Error {
                    message: e.to_string(),
                },
            )
            .await;
            return;
        }
    };

    tracing::info!(%session_id, "Session connected");

    // Greet the caller before the first client message.
    match handle.open_turn().await {
        Ok(output) => {
            if send_turn_output(&mut socket, &output).await.is_err() {
                return;
            }
        }
        Err(e) => {
            tracing::error!(%session_id, error = %e, "Greeting turn failed");
        }
    }

    let mut audio_content_type = "audio/webm".to_string();

    while let Some(message) = socket.recv().await {
        let message = match message {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(%session_id, error = %e, "WebSocket receive error");
                break;
            }
        };

        let input = match message {
            Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                Ok(ClientEvent::Text { text }) => TurnInput::Text(text),
                Ok(ClientEvent::AudioFormat { content_type }) => {
                    audio_content_type = content_type;
                    continue;
                }
                Err(e) => {
                    let _ = send_event(
                        &mut socket,
                        &ServerEvent::Error {
                            message: format!("Unrecognized message: {}", e),
                        },
                    )
                    .await;
                    continue;
                }
            },
            Message::Binary(data) => TurnInput::Audio {
                data: data.to_vec(),
                content_type: audio_content_type.clone(),
            },
            Message::Close(_) => break,
            _ => continue,
        };

        match handle.handle_turn(input).await {
            Ok(output) => {
                if send_turn_output(&mut socket, &output).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(%session_id, error = %e, "Turn failed");
                let failed = send_event(
                    &mut socket,
                    &ServerEvent::Error {
                        message: e.to_string(),
                    },
                )
                .await
                .is_err();
                if failed {
                    break;
                }
            }
        }
    }

    tracing::info!(%session_id, "Session closed");
}

async fn send_turn_output(socket: &mut WebSocket, output: &TurnOutput) -> Result<(), ()> {
    if let Some(transcript) = &output.transcript {
        send_event(
            socket,
            &ServerEvent::Transcript {
                text: transcript.clone(),
            },
        )
        .await?;
    }

    send_event(socket, &ServerEvent::reply_from(output)).await?;

    if let Some(audio) = &output.reply_audio {
        socket
            .send(Message::Binary(audio.clone().into()))
            .await
            .map_err(|_| ())?;
    }

    Ok(())
}

async fn send_event(socket: &mut WebSocket, event: &ServerEvent) -> Result<(), ()> {
    let json = serde_json::to_string(event).map_err(|_| ())?;
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

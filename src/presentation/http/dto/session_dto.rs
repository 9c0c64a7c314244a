use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::voice_pipeline::TurnOutput;

#[derive(Debug, Deserialize)]
pub struct ConnectRequestDto {
    pub equipment_id: Uuid,
    /// Falls back to the equipment's own tenant when absent.
    pub tenant_id: Option<String>,
    pub prompt_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConnectResponseDto {
    pub session_id: Uuid,
    pub equipment_id: Uuid,
    pub prompt_type: String,
    pub websocket_url: String,
}

/// Messages a client sends on the WebSocket as JSON text frames. Binary
/// frames carry raw audio for one voice turn.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// One text turn.
    Text { text: String },
    /// Declares the content type of subsequent binary audio frames.
    AudioFormat { content_type: String },
}

/// Messages the server sends back as JSON text frames. Synthesized reply
/// audio follows as a separate binary frame when available.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    Transcript {
        text: String,
    },
    Reply {
        text: String,
        sources: Vec<SourceDto>,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Serialize)]
pub struct SourceDto {
    pub document_id: Uuid,
    pub file_name: String,
    pub score: f32,
}

impl ServerEvent {
    pub fn reply_from(output: &TurnOutput) -> Self {
        ServerEvent::Reply {
            text: output.reply_text.clone(),
            sources: output
                .sources
                .iter()
                .map(|s| SourceDto {
                    document_id: s.document_id,
                    file_name: s.file_name.clone(),
                    score: s.score,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_wire_format() {
        let event: ClientEvent =
            serde_json::from_str(r#"{"type":"text","text":"How do I reset?"}"#).unwrap();
        assert!(matches!(event, ClientEvent::Text { text } if text == "How do I reset?"));

        let event: ClientEvent =
            serde_json::from_str(r#"{"type":"audio_format","content_type":"audio/wav"}"#).unwrap();
        assert!(matches!(event, ClientEvent::AudioFormat { .. }));
    }

    #[test]
    fn test_connect_request_carries_optional_tenant() {
        let dto: ConnectRequestDto = serde_json::from_str(
            r#"{"equipment_id":"6f1c1a9e-7b34-4be5-9d6a-3a2f6f1f0b11","tenant_id":"tenant-b"}"#,
        )
        .unwrap();
        assert_eq!(dto.tenant_id.as_deref(), Some("tenant-b"));

        let dto: ConnectRequestDto = serde_json::from_str(
            r#"{"equipment_id":"6f1c1a9e-7b34-4be5-9d6a-3a2f6f1f0b11"}"#,
        )
        .unwrap();
        assert!(dto.tenant_id.is_none());
    }

    #[test]
    fn test_server_event_wire_format() {
        let event = ServerEvent::Error {
            message: "boom".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"error""#));
        assert!(json.contains(r#""message":"boom""#));
    }
}

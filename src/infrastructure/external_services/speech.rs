use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError};
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::speech::{SpeechError, SpeechToText, TextToSpeech};

#[derive(Deserialize)]
struct DeepgramResponse {
    results: Option<DeepgramResults>,
}

#[derive(Deserialize)]
struct DeepgramResults {
    channels: Vec<DeepgramChannel>,
}

#[derive(Deserialize)]
struct DeepgramChannel {
    alternatives: Vec<DeepgramAlternative>,
}

#[derive(Deserialize)]
struct DeepgramAlternative {
    transcript: String,
}

/// Speech-to-text via Deepgram's prerecorded transcription endpoint.
pub struct DeepgramClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl DeepgramClient {
    pub fn new(api_key: String) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: "https://api.deepgram.com".to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl SpeechToText for DeepgramClient {
    async fn transcribe(&self, audio: &[u8], content_type: &str) -> Result<String, SpeechError> {
        let url = format!(
            "{}/v1/listen?model=nova-2&smart_format=true",
            self.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Token {}", self.api_key))
            .header("Content-Type", content_type)
            .body(audio.to_vec())
            .send()
            .await
            .map_err(|e| SpeechError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::ApiError(format!("{}: {}", status, body)));
        }

        let parsed = response
            .json::<DeepgramResponse>()
            .await
            .map_err(|e| SpeechError::ApiError(e.to_string()))?;

        let transcript = parsed
            .results
            .and_then(|r| r.channels.into_iter().next())
            .and_then(|c| c.alternatives.into_iter().next())
            .map(|a| a.transcript)
            .unwrap_or_default();

        if transcript.trim().is_empty() {
            return Err(SpeechError::NoTranscript);
        }

        Ok(transcript)
    }
}

/// Text-to-speech via ElevenLabs, returning MP3 audio.
pub struct ElevenLabsClient {
    client: Client,
    api_key: String,
    voice_id: String,
    base_url: String,
}

impl ElevenLabsClient {
    pub fn new(api_key: String, voice_id: String) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key,
            voice_id,
            base_url: "https://api.elevenlabs.io".to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl TextToSpeech for ElevenLabsClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let url = format!(
            "{}/v1/text-to-speech/{}",
            self.base_url.trim_end_matches('/'),
            self.voice_id
        );

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&serde_json::json!({
                "text": text,
                "model_id": "eleven_turbo_v2",
            }))
            .send()
            .await
            .map_err(|e| SpeechError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::ApiError(format!("{}: {}", status, body)));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechError::NetworkError(e.to_string()))?;

        Ok(audio.to_vec())
    }
}

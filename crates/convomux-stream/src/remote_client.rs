use crate::audio::AudioChannelConfig;
use crate::client_trait::{ChannelEvent, ChannelEventKind, StreamClient};
use async_trait::async_trait;
use convomux_core::SessionError;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Client for a remote bidirectional streaming backend. The transport
/// handshake and audio exchange happen outside this crate; this client
/// validates configuration, requests establishment and teardown, and reports
/// channel lifecycle back through the event sender.
pub struct RemoteStreamClient {
    endpoint: Option<String>,
    model_id: Option<String>,
    audio: AudioChannelConfig,
    event_tx: Mutex<Option<mpsc::UnboundedSender<ChannelEvent>>>,
}

impl RemoteStreamClient {
    pub fn new() -> Self {
        Self {
            endpoint: None,
            model_id: None,
            audio: AudioChannelConfig::default(),
            event_tx: Mutex::new(None),
        }
    }

    pub fn audio_config(&self) -> &AudioChannelConfig {
        &self.audio
    }

    fn emit(&self, session_id: &str, kind: ChannelEventKind) {
        if let Ok(sender) = self.event_tx.lock() {
            if let Some(tx) = sender.as_ref() {
                let _ = tx.send(ChannelEvent {
                    session_id: session_id.to_string(),
                    kind,
                });
            }
        }
    }
}

impl Default for RemoteStreamClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamClient for RemoteStreamClient {
    fn name(&self) -> &str {
        "remote"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), SessionError> {
        let endpoint = config
            .get("endpoint")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                SessionError::NotInitialized("missing 'endpoint' in config".to_string())
            })?;
        let model_id = config
            .get("model_id")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        let audio = match config.get("audio") {
            Some(value) => value
                .clone()
                .try_into()
                .map_err(|e: toml::de::Error| SessionError::NotInitialized(e.to_string()))?,
            None => AudioChannelConfig::default(),
        };

        self.endpoint = Some(endpoint.to_string());
        self.model_id = model_id;
        self.audio = audio;

        tracing::info!("RemoteStreamClient initialized (stub)");
        Ok(())
    }

    fn set_event_sender(&mut self, sender: mpsc::UnboundedSender<ChannelEvent>) {
        *self.event_tx.lock().unwrap() = Some(sender);
    }

    async fn open_channel(&self, session_id: &str) -> Result<(), SessionError> {
        let endpoint = self.endpoint.as_ref().ok_or_else(|| {
            SessionError::NotInitialized("open_channel called before initialize".to_string())
        })?;

        tracing::debug!(
            session_id = %session_id,
            endpoint = %endpoint,
            input_hz = self.audio.input_sample_rate_hz,
            output_hz = self.audio.output_sample_rate_hz,
            "RemoteStreamClient stub open"
        );
        self.emit(session_id, ChannelEventKind::Established);
        Ok(())
    }

    async fn close_channel(&self, session_id: &str) -> Result<(), SessionError> {
        tracing::debug!(session_id = %session_id, "RemoteStreamClient stub close");
        self.emit(session_id, ChannelEventKind::Closed);
        Ok(())
    }
}

use crate::client_trait::{ChannelEvent, ChannelEventKind, StreamClient};
use async_trait::async_trait;
use convomux_core::SessionError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Stream client that acknowledges every request immediately. Used in tests
/// and offline runs where no streaming backend is reachable.
pub struct NullStreamClient {
    event_tx: Mutex<Option<mpsc::UnboundedSender<ChannelEvent>>>,
    open_count: AtomicUsize,
}

impl NullStreamClient {
    pub fn new() -> Self {
        Self {
            event_tx: Mutex::new(None),
            open_count: AtomicUsize::new(0),
        }
    }

    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::Relaxed)
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

impl Default for NullStreamClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamClient for NullStreamClient {
    fn name(&self) -> &str {
        "null"
    }

    async fn initialize(&mut self, _config: toml::Value) -> Result<(), SessionError> {
        Ok(())
    }

    fn set_event_sender(&mut self, sender: mpsc::UnboundedSender<ChannelEvent>) {
        *self.event_tx.lock().unwrap() = Some(sender);
    }

    async fn open_channel(&self, session_id: &str) -> Result<(), SessionError> {
        let count = self.open_count.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::trace!(session_id = %session_id, "NullStreamClient open #{count}");
        self.emit(session_id, ChannelEventKind::Established);
        Ok(())
    }

    async fn close_channel(&self, session_id: &str) -> Result<(), SessionError> {
        self.emit(session_id, ChannelEventKind::Closed);
        Ok(())
    }
}

use async_trait::async_trait;
use convomux_core::SessionError;
use tokio::sync::mpsc;

/// Lifecycle notification from the streaming backend for one session channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEvent {
    pub session_id: String,
    pub kind: ChannelEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEventKind {
    Established,
    Closed,
}

/// Client for the bidirectional audio streaming backend.
///
/// The transport protocol itself lives outside this crate; implementations
/// only request channel establishment and teardown, and report the outcomes
/// asynchronously through the event sender installed by
/// [`set_event_sender`](Self::set_event_sender).
#[async_trait]
pub trait StreamClient: Send + Sync {
    /// Returns the client's plugin name (e.g. `"null"`, `"remote"`).
    fn name(&self) -> &str;
    /// One-time initialisation with client-specific TOML configuration.
    async fn initialize(&mut self, config: toml::Value) -> Result<(), SessionError>;
    /// Install the sender used to report [`ChannelEvent`]s.
    fn set_event_sender(&mut self, sender: mpsc::UnboundedSender<ChannelEvent>);
    /// Request establishment of the channel backing `session_id`.
    async fn open_channel(&self, session_id: &str) -> Result<(), SessionError>;
    /// Request teardown of the channel backing `session_id`.
    async fn close_channel(&self, session_id: &str) -> Result<(), SessionError>;
}

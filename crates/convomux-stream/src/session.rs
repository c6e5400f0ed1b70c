use crate::client_trait::{ChannelEvent, ChannelEventKind, StreamClient};
use convomux_core::SessionError;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionLifecycle {
    Created,
    Active,
    Closed,
}

/// Reference to a stream session. The registry keeps ownership; callers only
/// ever hold handles, which stay valid (reporting `Closed`) after the session
/// ends.
#[derive(Clone)]
pub struct SessionHandle {
    id: String,
    state: Arc<Mutex<SessionLifecycle>>,
}

impl SessionHandle {
    fn new(id: String) -> Self {
        Self {
            id,
            state: Arc::new(Mutex::new(SessionLifecycle::Created)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn lifecycle(&self) -> SessionLifecycle {
        *self.state.lock().unwrap()
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle() == SessionLifecycle::Active
    }

    fn set_lifecycle(&self, lifecycle: SessionLifecycle) {
        *self.state.lock().unwrap() = lifecycle;
    }
}

#[derive(Default)]
struct RegistryState {
    sessions: HashMap<String, SessionHandle>,
    // Insertion order for list_active snapshots
    order: Vec<String>,
    // Identifiers of closed sessions; never reused
    retired: HashSet<String>,
}

/// Tracks the lifecycle of audio streaming sessions: `Created` on insertion,
/// `Active` once the stream client reports the channel established, `Closed`
/// on explicit close or a client-reported teardown. Closed identifiers are
/// retired and rejected on re-creation.
///
/// Duplicate policy: a second `create` with a live or retired identifier is a
/// caller error (`DuplicateSession`). The streaming backend cannot multiplex
/// one identifier over two channels.
pub struct SessionRegistry {
    client: Arc<dyn StreamClient>,
    state: Arc<Mutex<RegistryState>>,
    event_rx: Mutex<Option<mpsc::UnboundedReceiver<ChannelEvent>>>,
    stop_tx: Mutex<Option<oneshot::Sender<()>>>,
    pump_handle: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl SessionRegistry {
    pub fn new(mut client: Box<dyn StreamClient>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        client.set_event_sender(event_tx);
        Self {
            client: Arc::from(client),
            state: Arc::new(Mutex::new(RegistryState::default())),
            event_rx: Mutex::new(Some(event_rx)),
            stop_tx: Mutex::new(None),
            pump_handle: Mutex::new(None),
        }
    }

    /// Spawn the event pump that applies client lifecycle notifications.
    pub fn start(&self) {
        let mut rx = self
            .event_rx
            .lock()
            .unwrap()
            .take()
            .expect("start() called but receiver already taken");
        let (stop_tx, mut stop_rx) = oneshot::channel();
        let state = Arc::clone(&self.state);

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    event = rx.recv() => {
                        match event {
                            Some(event) => apply_event(&state, event),
                            None => break,
                        }
                    }
                    _ = &mut stop_rx => break,
                }
            }
        });

        *self.stop_tx.lock().unwrap() = Some(stop_tx);
        *self.pump_handle.lock().unwrap() = Some(handle);
    }

    /// Create a session, generating an identifier when none is supplied.
    ///
    /// This only establishes local bookkeeping: the remote channel comes up
    /// asynchronously, so creation cannot fail on backend unavailability. A
    /// transport refusal leaves the session in `Created`.
    pub async fn create(&self, session_id: Option<&str>) -> Result<SessionHandle, SessionError> {
        let id = match session_id {
            Some(s) => s.to_string(),
            None => format!("session_{}", Uuid::new_v4()),
        };

        let handle = {
            let mut state = self.state.lock().unwrap();
            if state.sessions.contains_key(&id) || state.retired.contains(&id) {
                return Err(SessionError::DuplicateSession(id));
            }
            let handle = SessionHandle::new(id.clone());
            state.sessions.insert(id.clone(), handle.clone());
            state.order.push(id.clone());
            handle
        };

        if let Err(e) = self.client.open_channel(&id).await {
            tracing::warn!(session_id = %id, "channel establishment not started: {e}");
        }

        Ok(handle)
    }

    /// Explicitly terminate a session. Unknown identifiers are an error here,
    /// unlike `is_active`.
    pub async fn close(&self, session_id: &str) -> Result<(), SessionError> {
        let known = self.state.lock().unwrap().sessions.contains_key(session_id);
        if !known {
            return Err(SessionError::UnknownSession(session_id.to_string()));
        }

        self.client.close_channel(session_id).await?;

        // Retire immediately; the client's Closed event becomes a no-op.
        apply_event(
            &self.state,
            ChannelEvent {
                session_id: session_id.to_string(),
                kind: ChannelEventKind::Closed,
            },
        );
        Ok(())
    }

    /// Snapshot of `Active` session identifiers in insertion order.
    pub fn list_active(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .order
            .iter()
            .filter(|id| {
                state
                    .sessions
                    .get(*id)
                    .map(|h| h.is_active())
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    /// `false` for unknown, `Created` and `Closed` sessions; never errors.
    pub fn is_active(&self, session_id: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .sessions
            .get(session_id)
            .map(|h| h.is_active())
            .unwrap_or(false)
    }

    /// Look up a handle for a live (not yet closed) session.
    pub fn handle(&self, session_id: &str) -> Option<SessionHandle> {
        self.state.lock().unwrap().sessions.get(session_id).cloned()
    }

    pub async fn shutdown(&self) {
        let stop_tx = self.stop_tx.lock().unwrap().take();
        if let Some(tx) = stop_tx {
            let _ = tx.send(());
        }
        let handle = self.pump_handle.lock().unwrap().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

fn apply_event(state: &Arc<Mutex<RegistryState>>, event: ChannelEvent) {
    let mut state = state.lock().unwrap();
    match event.kind {
        ChannelEventKind::Established => {
            if let Some(handle) = state.sessions.get(&event.session_id) {
                if handle.lifecycle() == SessionLifecycle::Created {
                    handle.set_lifecycle(SessionLifecycle::Active);
                    tracing::debug!(session_id = %event.session_id, "session active");
                }
            }
        }
        ChannelEventKind::Closed => {
            if let Some(handle) = state.sessions.remove(&event.session_id) {
                handle.set_lifecycle(SessionLifecycle::Closed);
                state.order.retain(|id| id != &event.session_id);
                state.retired.insert(event.session_id.clone());
                tracing::debug!(session_id = %event.session_id, "session closed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::null_client::NullStreamClient;
    use std::time::Duration;

    fn registry() -> SessionRegistry {
        let registry = SessionRegistry::new(Box::new(NullStreamClient::new()));
        registry.start();
        registry
    }

    async fn wait_until(mut cond: impl FnMut() -> bool) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while !cond() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("timed out waiting for condition");
    }

    #[tokio::test]
    async fn test_create_generates_unique_ids() {
        let registry = registry();
        let h1 = registry.create(None).await.unwrap();
        let h2 = registry.create(None).await.unwrap();
        assert!(!h1.id().is_empty());
        assert_ne!(h1.id(), h2.id());
        registry.shutdown().await;
    }

    #[tokio::test]
    async fn test_create_with_explicit_id() {
        let registry = registry();
        let handle = registry.create(Some("mine")).await.unwrap();
        assert_eq!(handle.id(), "mine");
        registry.shutdown().await;
    }

    #[tokio::test]
    async fn test_create_duplicate_id_rejected() {
        let registry = registry();
        registry.create(Some("dup")).await.unwrap();
        let result = registry.create(Some("dup")).await;
        match result {
            Err(SessionError::DuplicateSession(id)) => assert_eq!(id, "dup"),
            _ => panic!("expected DuplicateSession"),
        }
        registry.shutdown().await;
    }

    #[tokio::test]
    async fn test_is_active_lifecycle() {
        let registry = registry();
        assert!(!registry.is_active("s1"));

        let handle = registry.create(Some("s1")).await.unwrap();
        wait_until(|| registry.is_active("s1")).await;
        assert!(handle.is_active());

        registry.close("s1").await.unwrap();
        assert!(!registry.is_active("s1"));
        assert_eq!(handle.lifecycle(), SessionLifecycle::Closed);
        registry.shutdown().await;
    }

    #[tokio::test]
    async fn test_closed_id_is_not_reusable() {
        let registry = registry();
        registry.create(Some("once")).await.unwrap();
        wait_until(|| registry.is_active("once")).await;
        registry.close("once").await.unwrap();

        let result = registry.create(Some("once")).await;
        match result {
            Err(SessionError::DuplicateSession(_)) => {}
            _ => panic!("expected DuplicateSession for retired id"),
        }
        registry.shutdown().await;
    }

    #[tokio::test]
    async fn test_close_unknown_session_errors() {
        let registry = registry();
        let result = registry.close("ghost").await;
        match result {
            Err(SessionError::UnknownSession(id)) => assert_eq!(id, "ghost"),
            _ => panic!("expected UnknownSession"),
        }
        registry.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_active_insertion_order() {
        let registry = registry();
        registry.create(Some("a1")).await.unwrap();
        registry.create(Some("a2")).await.unwrap();
        registry.create(Some("a3")).await.unwrap();
        wait_until(|| registry.list_active().len() == 3).await;

        assert_eq!(registry.list_active(), vec!["a1", "a2", "a3"]);

        registry.close("a2").await.unwrap();
        assert_eq!(registry.list_active(), vec!["a1", "a3"]);
        registry.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_active_excludes_created_sessions() {
        // Without the pump running, sessions stay in Created.
        let registry = SessionRegistry::new(Box::new(NullStreamClient::new()));
        registry.create(Some("pending")).await.unwrap();
        assert!(registry.list_active().is_empty());
        assert!(!registry.is_active("pending"));
    }

    #[tokio::test]
    async fn test_handle_lookup() {
        let registry = registry();
        registry.create(Some("s1")).await.unwrap();
        assert!(registry.handle("s1").is_some());
        assert!(registry.handle("missing").is_none());

        wait_until(|| registry.is_active("s1")).await;
        registry.close("s1").await.unwrap();
        assert!(registry.handle("s1").is_none());
        registry.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_completes() {
        let registry = registry();
        tokio::time::timeout(Duration::from_secs(2), registry.shutdown())
            .await
            .expect("shutdown timed out");
    }
}

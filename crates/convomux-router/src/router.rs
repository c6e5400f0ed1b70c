use crate::input::{classify, InboundInput, InputKind};
use convomux_core::{InferenceResult, RouteError};
use convomux_inference::TextInferenceClient;
use convomux_stream::{SessionHandle, SessionRegistry};
use std::sync::Arc;

/// Result of routing one inbound payload. The variant always matches the
/// branch taken: text inputs carry an inference result, audio inputs carry a
/// session that resolves in the registry at the moment of return.
pub enum RouteOutcome {
    Text(InferenceResult),
    Audio {
        session_id: String,
        session: SessionHandle,
    },
}

/// Unified entry point over both inference paths.
///
/// Text failures propagate unchanged: callers must see generation errors
/// rather than a silently empty answer. Audio session creation is local
/// bookkeeping and does not depend on backend availability.
pub struct InputRouter {
    text_client: TextInferenceClient,
    sessions: Arc<SessionRegistry>,
}

impl InputRouter {
    pub fn new(text_client: TextInferenceClient, sessions: Arc<SessionRegistry>) -> Self {
        Self {
            text_client,
            sessions,
        }
    }

    pub async fn route(&self, input: InboundInput) -> Result<RouteOutcome, RouteError> {
        match classify(&input) {
            InputKind::Text => {
                let query = input.text_content();
                tracing::debug!(len = query.len(), "routing text input");
                let response = self.text_client.process_query(&query).await?;
                Ok(RouteOutcome::Text(response))
            }
            InputKind::Audio => {
                let requested = input.requested_session_id();

                // An envelope naming a live session rejoins it instead of
                // colliding with the registry's duplicate rejection.
                if let Some(id) = requested {
                    if let Some(session) = self.sessions.handle(id) {
                        tracing::debug!(session_id = %id, "reusing audio session");
                        return Ok(RouteOutcome::Audio {
                            session_id: id.to_string(),
                            session,
                        });
                    }
                }

                let session = self.sessions.create(requested).await?;
                let session_id = session.id().to_string();
                tracing::debug!(session_id = %session_id, "created audio session");
                Ok(RouteOutcome::Audio {
                    session_id,
                    session,
                })
            }
        }
    }

    /// Identifiers of currently active audio sessions.
    pub fn active_sessions(&self) -> Vec<String> {
        self.sessions.list_active()
    }

    /// Whether `session_id` denotes a currently active audio session.
    pub fn is_session_active(&self, session_id: &str) -> bool {
        self.sessions.is_active(session_id)
    }
}

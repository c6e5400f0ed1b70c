use crate::backend_trait::TextBackend;
use async_trait::async_trait;
use convomux_core::{GenerationParams, InferenceError, InferenceResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Backend that echoes the user turn without calling any model. Used in tests
/// and offline runs; records the last system instruction it was given so
/// callers can inspect prompt selection.
pub struct EchoBackend {
    last_system: Mutex<Option<String>>,
    generate_count: AtomicUsize,
}

impl EchoBackend {
    pub fn new() -> Self {
        Self {
            last_system: Mutex::new(None),
            generate_count: AtomicUsize::new(0),
        }
    }

    pub fn generate_count(&self) -> usize {
        self.generate_count.load(Ordering::Relaxed)
    }

    /// The system instruction from the most recent `generate` call.
    pub fn last_system(&self) -> Option<String> {
        self.last_system.lock().unwrap().clone()
    }
}

impl Default for EchoBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextBackend for EchoBackend {
    fn name(&self) -> &str {
        "echo"
    }

    async fn initialize(&mut self, _config: toml::Value) -> Result<(), InferenceError> {
        Ok(())
    }

    async fn generate(
        &self,
        system: &str,
        user: &str,
        _params: &GenerationParams,
    ) -> Result<InferenceResult, InferenceError> {
        let count = self.generate_count.fetch_add(1, Ordering::Relaxed) + 1;
        *self.last_system.lock().unwrap() = Some(system.to_string());
        tracing::trace!("EchoBackend call #{count}, {} byte user turn", user.len());
        Ok(InferenceResult {
            content: format!("[echo] {user}"),
            usage: None,
        })
    }

    fn is_healthy(&self) -> bool {
        true
    }
}

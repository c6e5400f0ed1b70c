use async_trait::async_trait;
use convomux_core::{GenerationParams, InferenceError, InferenceResult};

/// A single-shot text generation backend.
///
/// Implementations own the provider-specific request and reply shapes;
/// callers hand over a system instruction, one user turn and generation
/// parameters, and get back a normalized [`InferenceResult`]. Swapping
/// providers must not change anything above this boundary.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Returns the backend's plugin name (e.g. `"http"`, `"echo"`).
    fn name(&self) -> &str;
    /// One-time initialisation with backend-specific TOML configuration.
    async fn initialize(&mut self, config: toml::Value) -> Result<(), InferenceError>;
    /// Invoke the model once with `system` guidance and a single `user` turn.
    async fn generate(
        &self,
        system: &str,
        user: &str,
        params: &GenerationParams,
    ) -> Result<InferenceResult, InferenceError>;
    /// Returns `true` if the backend is currently able to serve requests.
    fn is_healthy(&self) -> bool;
}

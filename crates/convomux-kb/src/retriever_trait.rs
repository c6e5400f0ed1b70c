use async_trait::async_trait;
use convomux_core::{Passage, RetrievalError};

/// A knowledge-base retriever that answers a query with an ordered sequence
/// of passages.
///
/// Implementations are registered via [`RetrieverRegistry`](crate::RetrieverRegistry)
/// and queried through [`retrieve`](Self::retrieve). Retrieval is best-effort
/// for callers: the inference layer degrades to a no-context prompt when a
/// retriever fails, so implementations should report errors honestly rather
/// than papering over them.
#[async_trait]
pub trait KnowledgeRetriever: Send + Sync {
    /// Returns the retriever's plugin name (e.g. `"http"`, `"static"`).
    fn name(&self) -> &str;
    /// One-time initialisation with retriever-specific TOML configuration.
    async fn initialize(&mut self, config: toml::Value) -> Result<(), RetrievalError>;
    /// Retrieve up to `top_k` passages relevant to `query`, most relevant first.
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<Passage>, RetrievalError>;
    /// Returns `true` if the retriever is currently able to serve queries.
    fn is_healthy(&self) -> bool;
}

use crate::retriever_trait::KnowledgeRetriever;
use async_trait::async_trait;
use convomux_core::{Passage, RetrievalError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory retriever serving passages straight from configuration. Used in
/// tests and offline runs where no retrieval service is reachable.
pub struct StaticRetriever {
    passages: Mutex<Vec<String>>,
    retrieve_count: AtomicUsize,
}

impl StaticRetriever {
    pub fn new() -> Self {
        Self {
            passages: Mutex::new(Vec::new()),
            retrieve_count: AtomicUsize::new(0),
        }
    }

    /// Build a retriever pre-loaded with passages, bypassing `initialize`.
    pub fn with_passages(passages: Vec<String>) -> Self {
        Self {
            passages: Mutex::new(passages),
            retrieve_count: AtomicUsize::new(0),
        }
    }

    pub fn retrieve_count(&self) -> usize {
        self.retrieve_count.load(Ordering::Relaxed)
    }
}

impl Default for StaticRetriever {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KnowledgeRetriever for StaticRetriever {
    fn name(&self) -> &str {
        "static"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), RetrievalError> {
        let passages = config
            .get("passages")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default();
        *self.passages.lock().unwrap() = passages;
        Ok(())
    }

    async fn retrieve(&self, _query: &str, top_k: usize) -> Result<Vec<Passage>, RetrievalError> {
        self.retrieve_count.fetch_add(1, Ordering::Relaxed);
        let passages = self.passages.lock().unwrap();
        Ok(passages
            .iter()
            .take(top_k)
            .map(|content| Passage {
                content: content.clone(),
                score: None,
            })
            .collect())
    }

    fn is_healthy(&self) -> bool {
        true
    }
}

use crate::backend_trait::TextBackend;
use crate::prompt;
use convomux_core::{GenerationParams, InferenceError, InferenceResult};
use convomux_kb::KnowledgeRetriever;
use std::sync::Arc;

/// Passages requested per query. Fixed; not a tuning knob of this core.
pub const DEFAULT_TOP_K: usize = 3;

/// Retrieval-augmented text inference with graceful degradation.
///
/// Retrieval failures never fail the query: the client falls back to the
/// no-context instruction and proceeds. Generation failures do fail it,
/// because without a generated answer there is nothing to return.
pub struct TextInferenceClient {
    retriever: Arc<dyn KnowledgeRetriever>,
    backend: Arc<dyn TextBackend>,
    params: GenerationParams,
    top_k: usize,
}

impl TextInferenceClient {
    pub fn new(retriever: Arc<dyn KnowledgeRetriever>, backend: Arc<dyn TextBackend>) -> Self {
        Self {
            retriever,
            backend,
            params: GenerationParams::default(),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Answer a single text query. The query is passed through unvalidated;
    /// the model backend is the authority on acceptable input.
    pub async fn process_query(&self, query: &str) -> Result<InferenceResult, InferenceError> {
        let context = match self.retriever.retrieve(query, self.top_k).await {
            Ok(passages) => prompt::render_context(&passages),
            Err(e) => {
                tracing::warn!("knowledge base unavailable, continuing without context: {e}");
                String::new()
            }
        };

        let instruction = prompt::build_instruction(&context);

        match self
            .backend
            .generate(&instruction, query, &self.params)
            .await
        {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::error!("text generation failed: {e}");
                Err(e)
            }
        }
    }
}

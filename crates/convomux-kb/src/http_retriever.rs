use crate::retriever_trait::KnowledgeRetriever;
use async_trait::async_trait;
use convomux_core::{Passage, RetrievalError};
use serde::{Deserialize, Serialize};

/// Retriever backed by an HTTP retrieval service. Sends the knowledge-base
/// identifier, the query and the result budget; expects a JSON body with a
/// `results` array of passages.
pub struct HttpRetriever {
    endpoint: Option<String>,
    api_key: Option<String>,
    knowledge_base_id: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct RetrieveRequest<'a> {
    knowledge_base_id: &'a str,
    query: &'a str,
    number_of_results: usize,
}

#[derive(Deserialize)]
struct RetrieveResponse {
    // A reply without a results array is treated as zero passages, not an error.
    #[serde(default)]
    results: Vec<Passage>,
}

impl HttpRetriever {
    pub fn new() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            knowledge_base_id: String::new(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpRetriever {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KnowledgeRetriever for HttpRetriever {
    fn name(&self) -> &str {
        "http"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), RetrievalError> {
        let endpoint = config
            .get("endpoint")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                RetrievalError::NotInitialized("missing 'endpoint' in config".to_string())
            })?;
        let api_key = config
            .get("api_key")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        let knowledge_base_id = config
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("kb-default")
            .to_string();

        self.endpoint = Some(endpoint.to_string());
        self.api_key = api_key;
        self.knowledge_base_id = knowledge_base_id;

        tracing::info!(
            knowledge_base_id = %self.knowledge_base_id,
            "HttpRetriever initialized"
        );
        Ok(())
    }

    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<Passage>, RetrievalError> {
        let endpoint = self.endpoint.as_ref().ok_or_else(|| {
            RetrievalError::NotInitialized("retrieve called before initialize".to_string())
        })?;

        let body = RetrieveRequest {
            knowledge_base_id: &self.knowledge_base_id,
            query,
            number_of_results: top_k,
        };

        let mut request = self.client.post(endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RetrievalError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Unavailable(format!(
                "retrieval service returned status {}",
                status.as_u16()
            )));
        }

        let parsed: RetrieveResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            knowledge_base_id = %self.knowledge_base_id,
            count = parsed.results.len(),
            "retrieved passages"
        );
        Ok(parsed.results)
    }

    fn is_healthy(&self) -> bool {
        self.endpoint.is_some()
    }
}

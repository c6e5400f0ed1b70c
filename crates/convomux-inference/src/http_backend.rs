use crate::backend_trait::TextBackend;
use async_trait::async_trait;
use convomux_core::{GenerationParams, InferenceError, InferenceResult, TokenUsage};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Backend invoking a remote text model over HTTP. The JSON envelope carries
/// the system instruction, one user message and the generation parameters;
/// the reply is expected to hold at least one content block and, optionally,
/// token usage counters.
pub struct HttpTextBackend {
    endpoint: Option<String>,
    api_key: Option<String>,
    model_id: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model_id: &'a str,
    system: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

impl HttpTextBackend {
    pub fn new() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model_id: "default".to_string(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTextBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextBackend for HttpTextBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), InferenceError> {
        let endpoint = config
            .get("endpoint")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                InferenceError::NotInitialized("missing 'endpoint' in config".to_string())
            })?;
        let api_key = config
            .get("api_key")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        let model_id = config
            .get("model_id")
            .and_then(|v| v.as_str())
            .unwrap_or("default")
            .to_string();
        let timeout_secs = config
            .get("timeout_secs")
            .and_then(|v| v.as_integer())
            .map(|v| v as u64)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        // The request timeout is the transport's concern; this core only
        // forwards it so a stalled model call fails instead of hanging.
        self.client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| InferenceError::NotInitialized(e.to_string()))?;
        self.endpoint = Some(endpoint.to_string());
        self.api_key = api_key;
        self.model_id = model_id;

        tracing::info!(model_id = %self.model_id, "HttpTextBackend initialized");
        Ok(())
    }

    async fn generate(
        &self,
        system: &str,
        user: &str,
        params: &GenerationParams,
    ) -> Result<InferenceResult, InferenceError> {
        let endpoint = self.endpoint.as_ref().ok_or_else(|| {
            InferenceError::NotInitialized("generate called before initialize".to_string())
        })?;

        let body = GenerateRequest {
            model_id: &self.model_id,
            system,
            messages: [ChatMessage {
                role: "user",
                content: user,
            }],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        };

        let mut request = self.client.post(endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| InferenceError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::BackendStatus(status.as_u16()));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::MalformedReply(e.to_string()))?;

        let content = parsed
            .content
            .first()
            .map(|block| block.text.clone())
            .ok_or_else(|| {
                InferenceError::MalformedReply("reply contained no content blocks".to_string())
            })?;

        Ok(InferenceResult {
            content,
            usage: parsed.usage,
        })
    }

    fn is_healthy(&self) -> bool {
        self.endpoint.is_some()
    }
}

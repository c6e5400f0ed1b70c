use serde::Deserialize;

/// One knowledge-base passage returned for a query. Lives for a single
/// query; never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct Passage {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Normalized reply from a single text model invocation.
#[derive(Debug, Clone)]
pub struct InferenceResult {
    pub content: String,
    pub usage: Option<TokenUsage>,
}

/// Generation parameters for a text model invocation. Fixed constants in
/// this core; callers do not tune them per request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

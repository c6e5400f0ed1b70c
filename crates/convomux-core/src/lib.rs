pub mod config;
pub mod error;
pub mod types;

pub use config::{
    AppConfig, GeneralConfig, KnowledgeBaseConfig, StreamModelConfig, TextModelConfig,
};
pub use error::{ConfigError, InferenceError, RetrievalError, RouteError, SessionError};
pub use types::{GenerationParams, InferenceResult, Passage, TokenUsage};

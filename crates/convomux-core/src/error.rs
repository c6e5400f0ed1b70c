use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),
}

/// Knowledge-base retrieval failures. These are recovered locally inside the
/// text inference client and never surface to route callers.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("retrieval service unavailable: {0}")]
    Unavailable(String),

    #[error("retrieval response invalid: {0}")]
    InvalidResponse(String),

    #[error("retriever provider not found: {0}")]
    ProviderNotFound(String),

    #[error("retriever not initialized: {0}")]
    NotInitialized(String),
}

/// Text generation failures. Fatal to the single request that hit them.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("model request failed: {0}")]
    RequestFailed(String),

    #[error("model backend returned status {0}")]
    BackendStatus(u16),

    #[error("malformed model reply: {0}")]
    MalformedReply(String),

    #[error("text backend not found: {0}")]
    BackendNotFound(String),

    #[error("text backend not initialized: {0}")]
    NotInitialized(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session already exists: {0}")]
    DuplicateSession(String),

    #[error("unknown session: {0}")]
    UnknownSession(String),

    #[error("stream client not found: {0}")]
    ClientNotFound(String),

    #[error("stream client not initialized: {0}")]
    NotInitialized(String),

    #[error("stream channel failed: {0}")]
    ChannelFailed(String),
}

/// Routing-level failure: whichever delegate failed, unmodified.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub mod backend_trait;
pub mod client;
pub mod echo_backend;
pub mod http_backend;
pub mod prompt;
pub mod registry;

pub use backend_trait::TextBackend;
pub use client::{TextInferenceClient, DEFAULT_TOP_K};
pub use echo_backend::EchoBackend;
pub use http_backend::HttpTextBackend;
pub use registry::BackendRegistry;

pub mod http_retriever;
pub mod registry;
pub mod retriever_trait;
pub mod static_retriever;

pub use http_retriever::HttpRetriever;
pub use registry::RetrieverRegistry;
pub use retriever_trait::KnowledgeRetriever;
pub use static_retriever::StaticRetriever;

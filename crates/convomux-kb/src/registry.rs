use crate::retriever_trait::KnowledgeRetriever;
use convomux_core::RetrievalError;
use std::collections::HashMap;

pub struct RetrieverRegistry {
    factories: HashMap<String, fn() -> Box<dyn KnowledgeRetriever>>,
}

impl RetrieverRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("static", || {
            Box::new(crate::static_retriever::StaticRetriever::new())
        });
        registry.register("http", || {
            Box::new(crate::http_retriever::HttpRetriever::new())
        });
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn KnowledgeRetriever>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn KnowledgeRetriever>, RetrievalError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| RetrievalError::ProviderNotFound(name.to_string()))
    }

    pub fn list_providers(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for RetrieverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use crate::backend_trait::TextBackend;
use convomux_core::InferenceError;
use std::collections::HashMap;

pub struct BackendRegistry {
    factories: HashMap<String, fn() -> Box<dyn TextBackend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("echo", || Box::new(crate::echo_backend::EchoBackend::new()));
        registry.register("http", || {
            Box::new(crate::http_backend::HttpTextBackend::new())
        });
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn TextBackend>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn TextBackend>, InferenceError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| InferenceError::BackendNotFound(name.to_string()))
    }

    pub fn list_backends(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

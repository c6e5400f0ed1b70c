use crate::client_trait::StreamClient;
use convomux_core::SessionError;
use std::collections::HashMap;

pub struct StreamClientRegistry {
    factories: HashMap<String, fn() -> Box<dyn StreamClient>>,
}

impl StreamClientRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("null", || Box::new(crate::null_client::NullStreamClient::new()));
        registry.register("remote", || {
            Box::new(crate::remote_client::RemoteStreamClient::new())
        });
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn StreamClient>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn StreamClient>, SessionError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| SessionError::ClientNotFound(name.to_string()))
    }

    pub fn list_clients(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for StreamClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

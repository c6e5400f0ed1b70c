use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub knowledge_base: Option<KnowledgeBaseConfig>,

    #[serde(default)]
    pub text_model: TextModelConfig,

    #[serde(default)]
    pub stream_model: StreamModelConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Knowledge-base retrieval settings. `provider` names a registered
/// retriever plugin; provider-specific keys (endpoint, api_key, passages)
/// ride along in `extra` and are handed to the plugin's `initialize`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct KnowledgeBaseConfig {
    #[serde(default = "default_kb_provider")]
    pub provider: String,

    #[serde(default = "default_kb_id")]
    pub id: String,

    #[serde(flatten)]
    pub extra: toml::Value,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TextModelConfig {
    #[serde(default = "default_text_backend")]
    pub backend: String,

    #[serde(default = "default_model_id")]
    pub model_id: String,

    #[serde(flatten)]
    pub extra: toml::Value,
}

impl Default for TextModelConfig {
    fn default() -> Self {
        Self {
            backend: default_text_backend(),
            model_id: default_model_id(),
            extra: empty_table(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StreamModelConfig {
    #[serde(default = "default_stream_client")]
    pub client: String,

    #[serde(default = "default_model_id")]
    pub model_id: String,

    #[serde(flatten)]
    pub extra: toml::Value,
}

impl Default for StreamModelConfig {
    fn default() -> Self {
        Self {
            client: default_stream_client(),
            model_id: default_model_id(),
            extra: empty_table(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_kb_provider() -> String {
    "http".to_string()
}

fn default_kb_id() -> String {
    "kb-default".to_string()
}

fn default_text_backend() -> String {
    "echo".to_string()
}

fn default_stream_client() -> String {
    "null".to_string()
}

fn default_model_id() -> String {
    "default".to_string()
}

fn empty_table() -> toml::Value {
    toml::Value::Table(Default::default())
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = input.to_string();
    let mut errors = Vec::new();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                errors.push(var_name.to_string());
            }
        }
    }

    if let Some(first_missing) = errors.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound(first_missing));
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let interpolated = interpolate_env_vars(&content)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }

    /// Parse configuration from a TOML string (for testing).
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_valid_toml() {
        let toml_str = r#"
[general]
log_level = "debug"

[knowledge_base]
provider = "http"
id = "kb-prod-42"
endpoint = "https://kb.internal/retrieve"

[text_model]
backend = "http"
model_id = "assistant-v2"
endpoint = "https://models.internal/invoke"
timeout_secs = 15

[stream_model]
client = "remote"
model_id = "speech-v1"
endpoint = "wss://stream.internal"
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");

        let kb = config.knowledge_base.unwrap();
        assert_eq!(kb.provider, "http");
        assert_eq!(kb.id, "kb-prod-42");
        assert_eq!(
            kb.extra.get("endpoint").unwrap().as_str(),
            Some("https://kb.internal/retrieve"),
        );

        assert_eq!(config.text_model.backend, "http");
        assert_eq!(config.text_model.model_id, "assistant-v2");
        assert_eq!(
            config.text_model.extra.get("timeout_secs").unwrap().as_integer(),
            Some(15),
        );

        assert_eq!(config.stream_model.client, "remote");
        assert_eq!(config.stream_model.model_id, "speech-v1");
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert!(config.knowledge_base.is_none());
        assert_eq!(config.text_model.backend, "echo");
        assert_eq!(config.text_model.model_id, "default");
        assert_eq!(config.stream_model.client, "null");
    }

    #[test]
    fn test_config_kb_section_defaults() {
        let toml_str = r#"
[knowledge_base]
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        let kb = config.knowledge_base.unwrap();
        assert_eq!(kb.provider, "http");
        assert_eq!(kb.id, "kb-default");
    }

    #[test]
    fn test_config_env_var_interpolation() {
        std::env::set_var("CONVOMUX_TEST_KEY", "secret123");
        let toml_str = r#"
[text_model]
api_key = "${CONVOMUX_TEST_KEY}"
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(
            config.text_model.extra.get("api_key").unwrap().as_str(),
            Some("secret123"),
        );
        std::env::remove_var("CONVOMUX_TEST_KEY");
    }

    #[test]
    fn test_config_missing_env_var_error() {
        let toml_str = r#"
[text_model]
api_key = "${DEFINITELY_DOES_NOT_EXIST_12345}"
"#;
        let result = AppConfig::from_toml_str(toml_str);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("DEFINITELY_DOES_NOT_EXIST_12345"));
    }

    #[test]
    fn test_config_invalid_toml_error() {
        let toml_str = "this is not valid toml [[[";
        let result = AppConfig::from_toml_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_section_roundtrips_to_plugin_value() {
        let toml_str = r#"
[text_model]
backend = "http"
model_id = "assistant-v2"
endpoint = "https://models.internal/invoke"
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        // Plugin initialize receives the whole section as a toml::Value
        let value = toml::Value::try_from(&config.text_model).unwrap();
        assert_eq!(value.get("model_id").unwrap().as_str(), Some("assistant-v2"));
        assert_eq!(
            value.get("endpoint").unwrap().as_str(),
            Some("https://models.internal/invoke"),
        );
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = std::env::temp_dir().join("convomux_test_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.toml");
        std::fs::write(
            &path,
            r#"
[general]
log_level = "warn"

[stream_model]
client = "remote"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.stream_model.client, "remote");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_config_load_from_file_not_found() {
        let result = AppConfig::load_from_file(std::path::Path::new("/nonexistent/path.toml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("failed to read config file"),
        );
    }
}

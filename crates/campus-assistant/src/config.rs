//! Configuration for the assistant service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AssistantConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Language model configuration
    pub llm: LlmConfig,
    /// Search provider configuration
    pub search: SearchConfig,
    /// Pipeline configuration
    pub pipeline: PipelineConfig,
    /// Request log configuration
    pub logging: LoggingConfig,
}

impl AssistantConfig {
    /// Load configuration from defaults, an optional TOML file and the environment
    ///
    /// The file path is taken from `ASSISTANT_CONFIG`. Environment variables
    /// always win over file values.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = match std::env::var("ASSISTANT_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply environment overrides through a lookup function
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = get("MODEL_NAME") {
            self.llm.model = model;
        }
        if let Some(url) = get("OPENAI_BASE_URL") {
            self.llm.base_url = url;
        }
        if let Some(key) = get("TAVILY_API_KEY") {
            self.search.api_key = Some(key);
        }
        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }
        if let Some(file) = get("LOG_FILE") {
            self.logging.file = PathBuf::from(file);
        }
    }

    /// Check the configuration is usable for serving requests
    pub fn validate(&self) -> Result<()> {
        if self.llm.api_key.is_none() {
            return Err(Error::Config("OPENAI_API_KEY is not set".to_string()));
        }
        if self.search.api_key.is_none() {
            return Err(Error::Config("TAVILY_API_KEY is not set".to_string()));
        }
        if self.pipeline.max_results == 0 {
            return Err(Error::Config("pipeline.max_results must be at least 1".to_string()));
        }
        if self.pipeline.include_domains.is_empty() {
            return Err(Error::Config("pipeline.include_domains must not be empty".to_string()));
        }
        if self.logging.max_bytes == 0 {
            return Err(Error::Config("logging.max_bytes must be positive".to_string()));
        }
        if self.logging.queue_capacity == 0 {
            return Err(Error::Config("logging.queue_capacity must be positive".to_string()));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// Language model configuration (OpenAI-compatible chat completions)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API base URL
    pub base_url: String,
    /// API key
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model name, also used in the attribution suffix
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            timeout_secs: 120,
        }
    }
}

/// Search provider configuration (Tavily)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// API base URL
    pub base_url: String,
    /// API key
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.tavily.com".to_string(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of search results fetched and shown to the answer model (k)
    pub max_results: usize,
    /// Search depth requested from the provider
    pub search_depth: String,
    /// Domains the search is restricted to
    pub include_domains: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_results: 5,
            search_depth: "advanced".to_string(),
            include_domains: default_domains(),
        }
    }
}

fn default_domains() -> Vec<String> {
    [
        "news.itmo.ru",
        "itmo.ru",
        "abit.itmo.ru",
        "edu.itmo.ru",
        "de.ifmo.ru",
        "itmo.events",
    ]
    .iter()
    .map(|d| d.to_string())
    .collect()
}

/// Request log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file path
    pub file: PathBuf,
    /// Rotate once the file reaches this many bytes
    pub max_bytes: u64,
    /// Number of rotated files to keep
    pub backups: usize,
    /// Capacity of the in-memory queue in front of the writer
    pub queue_capacity: usize,
    /// Mirror log lines to stdout
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("logs").join("api.log"),
            max_bytes: 5 * 1024 * 1024, // 5MB
            backups: 5,
            queue_capacity: 1024,
            console: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn keyed() -> AssistantConfig {
        let mut config = AssistantConfig::default();
        config.llm.api_key = Some("sk-test".to_string());
        config.search.api_key = Some("tvly-test".to_string());
        config
    }

    #[test]
    fn test_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.temperature, 0.0);
        assert_eq!(config.pipeline.max_results, 5);
        assert_eq!(config.pipeline.search_depth, "advanced");
        assert_eq!(config.pipeline.include_domains.len(), 6);
        assert_eq!(config.logging.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.logging.backups, 5);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("OPENAI_API_KEY", "sk-live"),
            ("MODEL_NAME", "gpt-4o"),
            ("PORT", "9000"),
            ("LOG_FILE", "/tmp/assistant.log"),
            ("TAVILY_API_KEY", ""),
        ]
        .into_iter()
        .collect();

        let mut config = AssistantConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.llm.api_key.as_deref(), Some("sk-live"));
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.file, PathBuf::from("/tmp/assistant.log"));
        // Blank values are ignored
        assert!(config.search.api_key.is_none());
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        let mut config = AssistantConfig::default();
        config.apply_env(|key| (key == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AssistantConfig::from_toml(
            r#"
            [pipeline]
            max_results = 3

            [logging]
            backups = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.pipeline.max_results, 3);
        assert_eq!(config.pipeline.include_domains.len(), 6);
        assert_eq!(config.logging.backups, 2);
        assert_eq!(config.logging.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_invalid_toml() {
        let err = AssistantConfig::from_toml("[pipeline\nmax_results = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate() {
        assert!(keyed().validate().is_ok());

        assert!(AssistantConfig::default().validate().is_err());

        let mut config = keyed();
        config.pipeline.max_results = 0;
        assert!(config.validate().is_err());

        let mut config = keyed();
        config.pipeline.include_domains.clear();
        assert!(config.validate().is_err());
    }
}

use crate::error::SymbiosisError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Symbiosis application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Gemini API base URL
    pub gemini_base_url: String,

    /// Gemini model name
    pub gemini_model: String,

    /// Gemini API key
    #[serde(default, skip_serializing)]
    pub gemini_api_key: String,

    /// Deadline for a single generation call, in seconds
    pub generation_timeout_secs: u64,

    /// Topic → reference ids JSON file
    pub topics_path: PathBuf,

    /// Article coordinates JSON file
    pub coords_path: PathBuf,

    /// Embedding dimension
    pub embedding_dim: usize,

    /// Map classification answers onto known topics
    pub strict_topics: bool,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_api_key: String::new(),
            generation_timeout_secs: 60,
            topics_path: PathBuf::from("./data/topics.json"),
            coords_path: PathBuf::from("./data/umap.json"),
            embedding_dim: 128,
            strict_topics: true,
            log_dir: PathBuf::from("./logs"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, SymbiosisError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();

        let config = Self {
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: Self::get_env_parsed("SERVER_PORT").unwrap_or(defaults.server_port),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or(defaults.gemini_base_url),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            generation_timeout_secs: Self::get_env_parsed("GENERATION_TIMEOUT_SECS")
                .unwrap_or(defaults.generation_timeout_secs),
            topics_path: Self::get_env_path("TOPICS_PATH").unwrap_or(defaults.topics_path),
            coords_path: Self::get_env_path("COORDS_PATH").unwrap_or(defaults.coords_path),
            embedding_dim: Self::get_env_parsed("EMBEDDING_DIM")
                .unwrap_or(defaults.embedding_dim),
            strict_topics: Self::get_env_parsed("STRICT_TOPICS")
                .unwrap_or(defaults.strict_topics),
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Parse environment variable, ignoring unparsable values
    fn get_env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
        std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Deadline applied to every generation call
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SymbiosisError> {
        if !self.gemini_base_url.starts_with("http://")
            && !self.gemini_base_url.starts_with("https://") {
            return Err(SymbiosisError::config(
                "Gemini base URL must start with http:// or https://"
            ));
        }

        if self.gemini_api_key.trim().is_empty() {
            return Err(SymbiosisError::config("GEMINI_API_KEY is not set"));
        }

        if self.gemini_model.is_empty() {
            return Err(SymbiosisError::config("Gemini model name cannot be empty"));
        }

        if self.embedding_dim == 0 {
            return Err(SymbiosisError::config("Embedding dimension must be positive"));
        }

        if self.generation_timeout_secs == 0 {
            return Err(SymbiosisError::config("Generation timeout cannot be 0"));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(SymbiosisError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}

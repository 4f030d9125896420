use crate::error::DocSearchError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base name of the optional configuration file (`docsearch.toml`, `docsearch.yaml`, ...)
pub const CONFIG_FILE_NAME: &str = "docsearch";

/// Prefix for environment variable overrides (`DOCSEARCH_SERVER_PORT=9000`)
pub const ENV_PREFIX: &str = "DOCSEARCH";

/// DocSearch application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document file, one `id: content` entry per line
    pub documents_path: PathBuf,

    /// Precomputed embedding matrix (.npy)
    pub embeddings_path: PathBuf,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Number of results returned when the caller does not ask for a count
    pub default_top_k: usize,

    /// Characters of document content shown per result
    pub preview_chars: usize,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,

    /// Also write logs to `log_dir/docsearch.log`
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            documents_path: PathBuf::from("documents.txt"),
            embeddings_path: PathBuf::from("embeddings.npy"),
            server_host: "127.0.0.1".to_string(),
            server_port: 8501,
            default_top_k: 10,
            preview_chars: 500,
            log_dir: PathBuf::from("log"),
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, `docsearch.toml` and `DOCSEARCH_*` variables
    pub fn load() -> Result<Self, DocSearchError> {
        Self::load_with(None)
    }

    /// Load configuration, reading `config_file` instead of the default file name if given
    ///
    /// Later sources win: built-in defaults, then the file, then the environment
    /// (including anything a `.env` file put there).
    pub fn load_with(config_file: Option<&Path>) -> Result<Self, DocSearchError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = config::Config::try_from(&Self::default())
            .map_err(|e| DocSearchError::config(format!("Invalid defaults: {}", e)))?;

        let file_source = match config_file {
            Some(path) => config::File::from(path.to_path_buf()).required(true),
            None => config::File::with_name(CONFIG_FILE_NAME).required(false),
        };

        let config: AppConfig = config::Config::builder()
            .add_source(defaults)
            .add_source(file_source)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| DocSearchError::config(format!("Failed to load configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Ensure the log directory exists, create if not
    pub fn ensure_directories(&self) -> Result<(), DocSearchError> {
        if self.log_to_file && !self.log_dir.exists() {
            std::fs::create_dir_all(&self.log_dir).map_err(|e| {
                DocSearchError::config(format!(
                    "Failed to create directory {}: {}",
                    self.log_dir.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DocSearchError> {
        if self.documents_path.as_os_str().is_empty() {
            return Err(DocSearchError::config("Document file path cannot be empty"));
        }

        if self.embeddings_path.as_os_str().is_empty() {
            return Err(DocSearchError::config("Embedding file path cannot be empty"));
        }

        if self.default_top_k == 0 {
            return Err(DocSearchError::config("default_top_k must be at least 1"));
        }

        if self.preview_chars == 0 {
            return Err(DocSearchError::config("preview_chars must be at least 1"));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(DocSearchError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}

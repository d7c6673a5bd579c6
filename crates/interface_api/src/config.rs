//! API configuration

use std::path::PathBuf;

use serde::Deserialize;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Root directory for uploaded documents
    pub upload_dir: PathBuf,
    /// Largest accepted file, in bytes
    pub max_upload_bytes: usize,
    /// Accepted file extensions, lower case without the dot
    pub allowed_extensions: Vec<String>,
    /// Load the demonstration claims at start-up
    pub seed_sample_data: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: 5 * 1024 * 1024,
            allowed_extensions: vec!["pdf".to_string(), "docx".to_string(), "xlsx".to_string()],
            seed_sample_data: true,
        }
    }
}

impl ApiConfig {
    /// Most files accepted in one upload request
    pub const MAX_FILES_PER_REQUEST: usize = 5;

    /// Loads configuration from environment
    ///
    /// `API_ALLOWED_EXTENSIONS` is a comma separated list.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("API")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("allowed_extensions"),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Request body limit for uploads, leaving room for multipart framing
    pub fn max_request_bytes(&self) -> usize {
        self.max_upload_bytes
            .saturating_mul(Self::MAX_FILES_PER_REQUEST)
            .saturating_add(64 * 1024)
    }
}

//! Store configuration module
//!
//! Handles loading and validating configuration from environment variables.

use thiserror::Error;

/// Default field selector sent with every fetch
pub const DEFAULT_FIELD_SELECTION: &[&str] = &["_id", "id", "attributes", "module", "type"];

/// Label key shown when a fetched record does not exist
pub const DEFAULT_NOT_FOUND_KEY: &str = "LBL_RECORD_DOES_NOT_EXIST";

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "info,record_staging=debug";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load environment variables: {0}")]
    EnvLoad(#[from] dotenvy::Error),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Settings consumed by a `RecordManager`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordManagerConfig {
    pub field_selection: Vec<String>,
    pub not_found_message_key: String,
    /// Whether `retrieve_record_default` reuses the shared fetch
    pub use_cache: bool,
}

impl Default for RecordManagerConfig {
    fn default() -> Self {
        Self {
            field_selection: DEFAULT_FIELD_SELECTION.iter().map(|s| s.to_string()).collect(),
            not_found_message_key: DEFAULT_NOT_FOUND_KEY.to_string(),
            use_cache: true,
        }
    }
}

/// Complete settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub manager: RecordManagerConfig,
    pub log_filter: String,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists; a malformed file is an error
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let defaults = RecordManagerConfig::default();

        let field_selection = match std::env::var("RECORD_FIELD_SELECTION") {
            Ok(raw) => Self::parse_field_selection(&raw)?,
            Err(_) => defaults.field_selection,
        };

        let not_found_message_key = std::env::var("RECORD_NOT_FOUND_MESSAGE_KEY")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.not_found_message_key);

        let use_cache = match std::env::var("RECORD_USE_CACHE") {
            Ok(raw) => Self::parse_flag(&raw)?,
            Err(_) => defaults.use_cache,
        };

        let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            manager: RecordManagerConfig {
                field_selection,
                not_found_message_key,
                use_cache,
            },
            log_filter,
        })
    }

    /// Parse a comma separated field selector
    fn parse_field_selection(raw: &str) -> Result<Vec<String>, ConfigError> {
        let fields: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if fields.is_empty() {
            return Err(ConfigError::InvalidValue(
                "RECORD_FIELD_SELECTION must name at least one field".to_string(),
            ));
        }
        Ok(fields)
    }

    fn parse_flag(raw: &str) -> Result<bool, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidValue(format!(
                "RECORD_USE_CACHE must be a boolean, got '{}'",
                other
            ))),
        }
    }
}

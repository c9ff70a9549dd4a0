//! Animation error types

use thiserror::Error;

/// Errors raised while loading animation configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this config
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of its allowed range
    #[error("Invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

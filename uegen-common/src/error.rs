//! Error types for uegen

use thiserror::Error;

/// Error types for the uegen common library.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Hex decoding errors for key material in configuration.
    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// YAML parsing errors.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

use thiserror::Error;

/// Main error type for the tailwind-styled crate
#[derive(Debug, Error)]
pub enum StyledError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid conflict pattern for group '{group}': {source}")]
    InvalidPattern {
        group: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to parse render spec {path}: {message}")]
    SpecError { path: String, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, StyledError>;

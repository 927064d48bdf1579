use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrickfallError {
    #[error("Failed to read or write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid level '{name}': {reason}")]
    InvalidLevel { name: String, reason: String },

    #[error("Invalid setting '{field}': {reason}")]
    InvalidSettings { field: &'static str, reason: String },
}

/// Result type alias for fallible loading and validation
pub type Result<T> = std::result::Result<T, BrickfallError>;

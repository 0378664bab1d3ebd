use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    /// Delimited text parsed, but produced no usable outline pages.
    MalformedInput(String),
    ValidationError(String),
    ParseError(String),
    GenerationError(String),
    Unauthenticated(String),
    Forbidden(String),
    NotFound(String),
    Http { status: u16, message: String },
    ConfigError(String),
    SecurityError(String),
    IoError(String),
    Internal(String),
}

impl AppError {
    /// Stable identifier used by front ends to pick a user-facing message.
    pub fn category(&self) -> &'static str {
        match self {
            AppError::MalformedInput(_) => "malformed_input",
            AppError::ValidationError(_) => "validation",
            AppError::ParseError(_) => "parse",
            AppError::GenerationError(_) => "generation",
            AppError::Unauthenticated(_) => "unauthenticated",
            AppError::Forbidden(_) => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::Http { .. } => "http",
            AppError::ConfigError(_) => "config",
            AppError::SecurityError(_) => "security",
            AppError::IoError(_) => "io",
            AppError::Internal(_) => "internal",
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AppError::Unauthenticated(_) | AppError::Forbidden(_))
    }

    /// Maps a non-success HTTP status from a storage or generation API
    /// onto the upload error categories.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => AppError::Unauthenticated(message),
            403 => AppError::Forbidden(message),
            404 => AppError::NotFound(message),
            _ => AppError::Http { status, message },
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::GenerationError(msg) => write!(f, "Generation error: {}", msg),
            AppError::Unauthenticated(msg) => write!(f, "Not signed in: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Permission denied: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Http { status, message } => {
                write!(f, "HTTP error ({}): {}", status, message)
            }
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::SecurityError(msg) => write!(f, "Security error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AppError::from_status(status.as_u16(), err.to_string()),
            None => AppError::Http {
                status: 0,
                message: err.to_string(),
            },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

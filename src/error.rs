use serde::Deserialize;
use thiserror::Error;

/// Error returned by every TMDB call.
///
/// `status_code` is the HTTP status (0 when no response was received),
/// `error_code` is TMDB's own `status_code` field from the error body.
#[derive(Debug, Clone, PartialEq, Eq, Error, Deserialize)]
#[error("{message} (status {status_code}, code {error_code})")]
pub struct ApiError {
    #[serde(skip)]
    pub status_code: u16,
    #[serde(rename = "status_code")]
    pub error_code: i64,
    #[serde(rename = "status_message")]
    pub message: String,
    #[serde(default)]
    pub success: bool,
}

impl ApiError {
    pub fn new(error_code: i64, message: impl Into<String>) -> Self {
        Self {
            status_code: 0,
            error_code,
            message: message.into(),
            success: false,
        }
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn url() -> Self {
        Self::new(0, "URL error")
    }

    pub fn body_encoding() -> Self {
        Self::new(0, "Error encoding http body")
    }

    pub fn decoding() -> Self {
        Self::new(0, "Error decoding data")
    }

    pub fn invalid_response() -> Self {
        Self::new(0, "Invalid HTTP response")
    }

    pub fn unknown_backend(status_code: u16) -> Self {
        Self::new(0, "Unknown backend error").with_status(status_code)
    }

    pub fn transport(detail: impl std::fmt::Display) -> Self {
        Self::new(0, format!("Unknown API error {}", detail))
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code == 401
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not determine config path")]
    NoConfigDir,

    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write storage file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

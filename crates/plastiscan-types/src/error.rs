//! Error types for plastiscan

use thiserror::Error;

/// Errors raised while acquiring an image or driving a scan.
///
/// None of these are fatal: every variant leaves the session either unchanged
/// or back on the capture screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Camera permission denied or no camera present
    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),

    /// File dialog was cancelled
    #[error("No file selected")]
    NoFileSelected,

    /// Selected file is missing, corrupt or not an image
    #[error("Unreadable file: {0}")]
    UnreadableFile(String),

    /// A capture was triggered while another analysis is in flight
    #[error("An analysis is already in progress")]
    BusyAnalyzing,

    /// Analysis was cancelled or timed out before the classifier resolved
    #[error("Analysis cancelled")]
    AnalysisCancelled,

    /// Event not accepted on the current screen
    #[error("Cannot handle '{event}' on the {screen} screen")]
    InvalidTransition {
        screen: &'static str,
        event: &'static str,
    },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Unknown plastic grade: {0}")]
    UnknownGrade(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(ConfigError::ParseError(err.to_string()))
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(ConfigError::SaveError(err.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

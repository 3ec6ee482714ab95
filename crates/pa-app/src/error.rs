//! Error types for the pa-app service layer.

use std::path::PathBuf;

/// Application error type shared by every frontend.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Reading not found: {0}")]
    ReadingNotFound(String),

    #[error("Record error: {0}")]
    Record(String),

    #[error("Failed to read record file: {path}")]
    RecordFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write record file: {path}")]
    RecordFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No exchange rate from {from} to {to}")]
    MissingRate { from: String, to: String },

    #[error("Curve error: {0}")]
    Curve(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pa-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<pa_project::ProjectError> for AppError {
    fn from(err: pa_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<pa_project::ValidationError> for AppError {
    fn from(err: pa_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<pa_record::RecordError> for AppError {
    fn from(err: pa_record::RecordError) -> Self {
        AppError::Record(err.to_string())
    }
}

impl From<pa_curves::CurveError> for AppError {
    fn from(err: pa_curves::CurveError) -> Self {
        AppError::Curve(err.to_string())
    }
}

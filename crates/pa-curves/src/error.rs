//! Curve library errors.

use crate::class::CurveClass;
use thiserror::Error;

/// Result type for curve lookups and library loading.
pub type CurveResult<T> = Result<T, CurveError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// No reference curve exists for the requested motor class.
    #[error("No reference efficiency curve for motor class {class}")]
    UnknownCurveClass { class: CurveClass },

    /// A table failed validation on load.
    #[error("Invalid curve table for {context}: {what}")]
    InvalidTable { context: String, what: &'static str },

    #[error("Duplicate curve table for motor class {class}")]
    DuplicateClass { class: CurveClass },

    #[error("Invalid pole count: {poles}")]
    InvalidPoleCount { poles: u8 },

    #[error("Curve library parse error: {message}")]
    Parse { message: String },
}

impl From<serde_yaml::Error> for CurveError {
    fn from(e: serde_yaml::Error) -> Self {
        CurveError::Parse {
            message: e.to_string(),
        }
    }
}

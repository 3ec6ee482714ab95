//! Error types for kernel stages.

use pa_core::PaError;
use pa_curves::{CurveClass, CurveError};
use thiserror::Error;

/// Errors that can end an audit.
///
/// All kinds are deterministic functions of the input; none are transient.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// The motor class has no reference efficiency curve.
    #[error("No reference efficiency curve for motor class {class}")]
    UnknownCurveClass { class: CurveClass },

    /// Zero or near-zero current: the pump is off and nothing can be measured.
    #[error("No-load condition: mean phase current {mean_current_a} A is below the measurable threshold")]
    NoLoadCondition { mean_current_a: f64 },

    /// A derived quantity is outside its physical bound, which points at
    /// instrumentation rather than the installation.
    #[error("Implausible reading: {what} ({value})")]
    ImplausibleReading { what: &'static str, value: f64 },

    #[error("Invalid input: {what}")]
    InvalidInput { what: &'static str },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Curve library error: {0}")]
    Curve(CurveError),
}

pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    /// True for errors that mean "re-take the measurement" rather than
    /// "fix the configuration".
    pub fn is_data_quality(&self) -> bool {
        matches!(
            self,
            KernelError::NoLoadCondition { .. }
                | KernelError::ImplausibleReading { .. }
                | KernelError::NonFinite { .. }
        )
    }
}

impl From<CurveError> for KernelError {
    fn from(e: CurveError) -> Self {
        match e {
            CurveError::UnknownCurveClass { class } => KernelError::UnknownCurveClass { class },
            other => KernelError::Curve(other),
        }
    }
}

impl From<PaError> for KernelError {
    fn from(e: PaError) -> Self {
        match e {
            PaError::NonFinite { what, value } => KernelError::NonFinite { what, value },
            PaError::Negative { what, .. } => KernelError::InvalidInput { what },
        }
    }
}

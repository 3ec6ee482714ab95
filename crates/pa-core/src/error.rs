use thiserror::Error;

pub type PaResult<T> = Result<T, PaError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Negative value for {what}: {value}")]
    Negative { what: &'static str, value: f64 },
}

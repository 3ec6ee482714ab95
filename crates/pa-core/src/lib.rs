//! pa-core: stable foundation for the pump audit kernel.
//!
//! Contains:
//! - units (uom SI types + constructors for nameplate and gauge units)
//! - numeric (Real + finiteness guards + phase statistics)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PaError, PaResult};
pub use numeric::*;
pub use units::*;

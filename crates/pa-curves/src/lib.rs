//! pa-curves: standard reference curves for asynchronous motors.
//!
//! Provides:
//! - IEC 60034-30-1 efficiency-vs-load tables keyed by [`CurveClass`]
//! - the NEMA MG-1 phase-imbalance derating table
//! - [`CurveLibrary`], an immutable lookup structure, and a process-wide
//!   standard instance initialised once on first use
//!
//! # Example
//!
//! ```
//! use pa_curves::{CurveClass, CurveLibrary, EfficiencyClass, PoleCount, PowerBand};
//!
//! let class = CurveClass::new(EfficiencyClass::IE3, PoleCount::Four, PowerBand::Medium);
//! let eta = CurveLibrary::standard().efficiency_at(class, 0.6).unwrap();
//! assert!(eta > 0.9 && eta < 1.0);
//! ```

pub mod class;
pub mod derating;
pub mod error;
pub mod iec;
pub mod library;
pub mod table;

pub use class::{CurveClass, EfficiencyClass, PoleCount, PowerBand};
pub use derating::{DeratingPoint, DeratingTable};
pub use error::{CurveError, CurveResult};
pub use library::CurveLibrary;
pub use table::{CurvePoint, CurveTable};

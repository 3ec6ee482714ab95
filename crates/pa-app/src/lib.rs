//! Shared application service layer for pump audits.
//!
//! Loads audit projects, runs the kernel over their readings, seals and
//! writes records, verifies records and renders plain-text summaries. The
//! CLI is a thin shell over this crate.

pub mod audit_service;
pub mod curve_service;
pub mod error;
pub mod exchange;
pub mod project_service;
pub mod report;

// Re-export key types for convenience
pub use audit_service::{
    AuditOptions, ReadingAudit, ReadingOutcome, run_project, verify_file, write_records,
};
pub use curve_service::{CurveSummary, list_curves, lookup};
pub use error::{AppError, AppResult};
pub use exchange::ExchangeTable;
pub use project_service::{
    ReadingSummary, list_readings, load_project, read_project, save_project,
    validate_project,
};
pub use report::render_summary;

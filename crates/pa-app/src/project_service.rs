//! Project loading, saving, validation, and introspection.

use chrono::{DateTime, Utc};
use pa_project::{AuditProject, ElectricalDef};
use std::path::Path;

use crate::error::AppResult;

/// Summary of a reading for listing.
#[derive(Debug, Clone)]
pub struct ReadingSummary {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub three_phase: bool,
    pub mean_current_a: f64,
    pub flow_rate_m3_h: f64,
}

/// Parse a project from a YAML or JSON file without validating it.
pub fn read_project(path: &Path) -> AppResult<AuditProject> {
    Ok(pa_project::read(path)?)
}

/// Load and validate a project from a YAML or JSON file.
pub fn load_project(path: &Path) -> AppResult<AuditProject> {
    let project = pa_project::load(path)?;
    tracing::debug!(
        path = %path.display(),
        station = %project.site.station_id,
        readings = project.readings.len(),
        "project loaded"
    );
    Ok(project)
}

/// Save a project as YAML.
pub fn save_project(path: &Path, project: &AuditProject) -> AppResult<()> {
    pa_project::save_yaml(path, project)?;
    Ok(())
}

/// Validate project structure and values.
pub fn validate_project(project: &AuditProject) -> AppResult<()> {
    pa_project::validate_project(project)?;
    Ok(())
}

/// List the readings in the project with summaries.
pub fn list_readings(project: &AuditProject) -> Vec<ReadingSummary> {
    project
        .readings
        .iter()
        .map(|r| ReadingSummary {
            id: r.id.clone(),
            timestamp: r.timestamp,
            three_phase: matches!(r.electrical, ElectricalDef::ThreePhase { .. }),
            mean_current_a: r.to_field_reading().mean_current_a(),
            flow_rate_m3_h: r.flow_rate_m3_h,
        })
        .collect()
}

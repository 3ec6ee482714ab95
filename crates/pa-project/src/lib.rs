//! pa-project: audit project file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_project};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported project file extension: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a YAML project without validating it.
pub fn read_yaml(path: &Path) -> ProjectResult<AuditProject> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Parse a JSON project without validating it.
pub fn read_json(path: &Path) -> ProjectResult<AuditProject> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn load_yaml(path: &Path) -> ProjectResult<AuditProject> {
    let project = read_yaml(path)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_yaml(path: &Path, project: &AuditProject) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_yaml::to_string(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<AuditProject> {
    let project = read_json(path)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_json(path: &Path, project: &AuditProject) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_json::to_string_pretty(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Parse by extension (`.yaml`/`.yml` or `.json`) without validating.
pub fn read(path: &Path) -> ProjectResult<AuditProject> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match extension.as_str() {
        "yaml" | "yml" => read_yaml(path),
        "json" => read_json(path),
        _ => Err(ProjectError::UnsupportedFormat { extension }),
    }
}

/// Parse by extension and validate.
pub fn load(path: &Path) -> ProjectResult<AuditProject> {
    let project = read(path)?;
    validate_project(&project)?;
    Ok(project)
}

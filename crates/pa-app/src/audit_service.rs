//! Audit execution, record output and verification.

use pa_curves::CurveLibrary;
use pa_kernel::{AuditOutcome, KernelError, run_audit};
use pa_project::{AuditProject, ReadingDef};
use pa_record::{Assembler, AuditContext, AuditRecord, SigningKey};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Options for auditing a project.
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    /// Sign records with this key; digest only when absent
    pub key: Option<SigningKey>,
    /// Audit only these readings; every reading when empty
    pub reading_ids: Vec<String>,
}

/// What the kernel made of one reading.
#[derive(Debug, Clone)]
pub enum ReadingOutcome {
    Audited {
        outcome: Box<AuditOutcome>,
        record: Box<AuditRecord>,
    },
    /// The kernel refused the reading; no record is produced.
    Rejected(KernelError),
}

#[derive(Debug, Clone)]
pub struct ReadingAudit {
    pub reading_id: String,
    pub outcome: ReadingOutcome,
}

impl ReadingAudit {
    pub fn record(&self) -> Option<&AuditRecord> {
        match &self.outcome {
            ReadingOutcome::Audited { record, .. } => Some(record.as_ref()),
            ReadingOutcome::Rejected(_) => None,
        }
    }

    pub fn error(&self) -> Option<&KernelError> {
        match &self.outcome {
            ReadingOutcome::Audited { .. } => None,
            ReadingOutcome::Rejected(e) => Some(e),
        }
    }
}

fn select<'a>(project: &'a AuditProject, ids: &[String]) -> AppResult<Vec<&'a ReadingDef>> {
    if ids.is_empty() {
        return Ok(project.readings.iter().collect());
    }
    ids.iter()
        .map(|id| {
            project
                .reading(id)
                .ok_or_else(|| AppError::ReadingNotFound(id.clone()))
        })
        .collect()
}

/// Audit the selected readings of `project` in parallel.
///
/// Results come back in project order. A reading the kernel rejects is
/// reported as [`ReadingOutcome::Rejected`] and does not stop the others.
pub fn run_project(project: &AuditProject, options: &AuditOptions) -> AppResult<Vec<ReadingAudit>> {
    let readings = select(project, &options.reading_ids)?;

    let mut assembler = Assembler::new().with_context(AuditContext {
        station_id: project.site.station_id.clone(),
        auditor: project.site.auditor.clone(),
    });
    if let Some(key) = &options.key {
        assembler = assembler.with_key(key.clone());
    }
    let curves = CurveLibrary::standard();

    tracing::info!(
        station = %project.site.station_id,
        readings = readings.len(),
        signed = assembler.signs(),
        "auditing project"
    );

    readings
        .par_iter()
        .map(|def| -> AppResult<ReadingAudit> {
            let reading = def.to_field_reading();
            let result = run_audit(
                &project.nameplate,
                &reading,
                &project.tariff,
                &project.settings,
                curves,
            );
            let outcome = match result {
                Ok(outcome) => {
                    let record = assembler.assemble_outcome(&project.nameplate, &reading, &outcome)?;
                    ReadingOutcome::Audited {
                        outcome: Box::new(outcome),
                        record: Box::new(record),
                    }
                }
                Err(e) => {
                    tracing::warn!(reading = %def.id, error = %e, "reading rejected");
                    ReadingOutcome::Rejected(e)
                }
            };
            Ok(ReadingAudit {
                reading_id: def.id.clone(),
                outcome,
            })
        })
        .collect()
}

fn file_stem(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Write one pretty JSON file per audited reading into `dir`.
pub fn write_records(dir: &Path, station_id: &str, audits: &[ReadingAudit]) -> AppResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| AppError::RecordFileWrite {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut written = Vec::new();
    for audit in audits {
        let Some(record) = audit.record() else {
            continue;
        };
        let path = dir.join(format!(
            "{}_{}.json",
            file_stem(station_id),
            file_stem(&audit.reading_id)
        ));
        let json = record
            .to_json_pretty()
            .map_err(|e| AppError::Record(e.to_string()))?;
        std::fs::write(&path, json).map_err(|e| AppError::RecordFileWrite {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), digest = record.digest(), "record written");
        written.push(path);
    }
    Ok(written)
}

/// Load a record file and check its digest, and its signature when a key is
/// given.
pub fn verify_file(path: &Path, key: Option<&SigningKey>) -> AppResult<AuditRecord> {
    let text = std::fs::read_to_string(path).map_err(|e| AppError::RecordFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let record = AuditRecord::from_json(&text).map_err(|e| AppError::Record(e.to_string()))?;
    pa_record::verify(&record, key)?;
    Ok(record)
}

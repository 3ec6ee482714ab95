use clap::{Parser, Subcommand, ValueEnum};
use pa_app::{
    AppError, AppResult, AuditOptions, ExchangeTable, ReadingOutcome, curve_service,
    project_service, render_summary, run_project, verify_file, write_records,
};
use pa_curves::{EfficiencyClass, PoleCount};
use pa_record::SigningKey;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the record signing key.
const SIGNING_KEY_ENV: &str = "PUMP_AUDIT_SIGNING_KEY";

#[derive(Parser)]
#[command(name = "pump-audit")]
#[command(about = "Pump audit CLI - wire-to-water efficiency and energy waste", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and values
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// List readings in a project
    Readings {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Audit readings and write one record per reading
    Audit {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Reading ID to audit (repeatable; all readings by default)
        #[arg(short, long = "reading")]
        readings: Vec<String>,
        /// Directory for record files
        #[arg(short, long, default_value = "audit-records")]
        out: PathBuf,
        /// File holding the signing key (falls back to PUMP_AUDIT_SIGNING_KEY)
        #[arg(long)]
        key_file: Option<PathBuf>,
        /// Do not print the text summary
        #[arg(long)]
        quiet: bool,
    },
    /// Verify record files against their digest and, with a key, signature
    Verify {
        /// Record JSON files
        #[arg(required = true)]
        records: Vec<PathBuf>,
        /// File holding the signing key (falls back to PUMP_AUDIT_SIGNING_KEY)
        #[arg(long)]
        key_file: Option<PathBuf>,
    },
    /// List the bundled reference efficiency curves
    Curves,
    /// Look up motor efficiency for a rating and load
    Lookup {
        /// IEC efficiency class
        #[arg(long, value_enum)]
        class: ClassArg,
        /// Pole count (2, 4, 6 or 8)
        #[arg(long)]
        poles: u8,
        /// Rated output (kW)
        #[arg(long)]
        rated_kw: f64,
        /// Load as a fraction of rated output
        #[arg(long)]
        load: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ClassArg {
    Ie1,
    Ie2,
    Ie3,
    Ie4,
}

impl From<ClassArg> for EfficiencyClass {
    fn from(c: ClassArg) -> Self {
        match c {
            ClassArg::Ie1 => EfficiencyClass::IE1,
            ClassArg::Ie2 => EfficiencyClass::IE2,
            ClassArg::Ie3 => EfficiencyClass::IE3,
            ClassArg::Ie4 => EfficiencyClass::IE4,
        }
    }
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Readings { project_path } => cmd_readings(&project_path),
        Commands::Audit {
            project_path,
            readings,
            out,
            key_file,
            quiet,
        } => cmd_audit(&project_path, readings, &out, key_file.as_deref(), quiet),
        Commands::Verify { records, key_file } => cmd_verify(&records, key_file.as_deref()),
        Commands::Curves => cmd_curves(),
        Commands::Lookup {
            class,
            poles,
            rated_kw,
            load,
        } => cmd_lookup(class, poles, rated_kw, load),
    }
}

/// Key from `--key-file`, else the environment, else none.
fn signing_key(key_file: Option<&Path>) -> AppResult<Option<SigningKey>> {
    let text = match key_file {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => std::env::var(SIGNING_KEY_ENV).ok(),
    };
    match text {
        Some(text) => Ok(Some(SigningKey::from_text(&text)?)),
        None => Ok(None),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::read_project(project_path)?;
    project_service::validate_project(&project)?;
    println!(
        "✓ Project is valid ({} readings for station {})",
        project.readings.len(),
        project.site.station_id
    );
    Ok(())
}

fn cmd_readings(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let readings = project_service::list_readings(&project);

    if readings.is_empty() {
        println!("No readings found in project");
    } else {
        println!("Readings for station {}:", project.site.station_id);
        for r in readings {
            println!(
                "  {} - {} ({}, {:.1} A mean, {:.1} m3/h)",
                r.id,
                r.timestamp.format("%Y-%m-%d %H:%M"),
                if r.three_phase { "3-phase" } else { "single-phase" },
                r.mean_current_a,
                r.flow_rate_m3_h
            );
        }
    }
    Ok(())
}

fn cmd_audit(
    project_path: &Path,
    reading_ids: Vec<String>,
    out: &Path,
    key_file: Option<&Path>,
    quiet: bool,
) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let options = AuditOptions {
        key: signing_key(key_file)?,
        reading_ids,
    };
    if options.key.is_none() {
        println!("No signing key configured; records carry a digest only");
    }

    let audits = run_project(&project, &options)?;
    let exchange = project.exchange_rates.as_ref().map(ExchangeTable::from_def);

    for audit in &audits {
        match &audit.outcome {
            ReadingOutcome::Audited { record, .. } => {
                if !quiet {
                    println!("{}", render_summary(record, exchange.as_ref())?);
                }
            }
            ReadingOutcome::Rejected(e) => {
                println!("✗ Reading {} not audited: {}", audit.reading_id, e);
            }
        }
    }

    let written = write_records(out, &project.site.station_id, &audits)?;
    println!("✓ {} of {} readings audited", written.len(), audits.len());
    for path in written {
        println!("  {}", path.display());
    }
    Ok(())
}

fn cmd_verify(records: &[PathBuf], key_file: Option<&Path>) -> AppResult<()> {
    let key = signing_key(key_file)?;
    let mut failed = 0usize;
    for path in records {
        match verify_file(path, key.as_ref()) {
            Ok(record) => println!("✓ {} ({})", path.display(), record.digest()),
            Err(e) => {
                println!("✗ {}: {}", path.display(), e);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        return Err(AppError::Record(format!("{failed} record(s) failed verification")));
    }
    Ok(())
}

fn cmd_curves() -> AppResult<()> {
    println!("{:<22} {:>9} {:>12}", "class", "full load", "peak");
    for c in curve_service::list_curves()? {
        println!(
            "{:<22} {:>8.1}% {:>6.1}% @ {:.2}",
            c.class.to_string(),
            c.full_load_efficiency * 100.0,
            c.peak_efficiency * 100.0,
            c.peak_load
        );
    }
    Ok(())
}

fn cmd_lookup(class: ClassArg, poles: u8, rated_kw: f64, load: f64) -> AppResult<()> {
    let poles = PoleCount::try_from(poles)?;
    let (curve_class, efficiency) = curve_service::lookup(class.into(), poles, rated_kw, load)?;
    println!("{curve_class} at {:.0}% load: {:.1}%", load * 100.0, efficiency * 100.0);
    Ok(())
}

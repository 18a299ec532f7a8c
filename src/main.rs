// src/main.rs
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dgus_check::{validate, ValidatorConfig};
use dgus_core::Firmware;

#[derive(Parser)]
#[command(name = "dgus-validator")]
#[command(author, version, about = "Validate DGUS touchscreen firmware resources", long_about = None)]
struct Args {
    /// Firmware directory containing DWIN_SET
    #[arg(value_name = "BASEDIR", default_value = "../dgusm")]
    basedir: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Exit with a failure status when validation finds errors
    #[arg(long)]
    strict: bool,
}

fn init_logging(debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.debug)?;

    if !args.basedir.is_dir() {
        anyhow::bail!("Firmware directory not found: {}", args.basedir.display());
    }

    info!("Validating firmware in {}", args.basedir.display());
    let firmware = Firmware::load(&args.basedir)
        .with_context(|| format!("Failed to load firmware from {}", args.basedir.display()))?;

    let config = ValidatorConfig::default();
    debug!("{:?}", config);
    let report = validate(&firmware, &config);

    report
        .write_to(&mut io::stdout().lock(), &mut io::stderr().lock())
        .context("Failed to write report")?;

    if args.strict && report.has_errors() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

// src/bin/dgus-dump.rs
use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use dgus_core::Firmware;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    Touch,
    Display,
    Icons,
    Pages,
}

#[derive(Parser)]
#[command(name = "dgus-dump")]
#[command(about = "List the decoded records of a DGUS firmware directory")]
struct Args {
    /// Firmware directory containing DWIN_SET
    #[arg(value_name = "BASEDIR", default_value = "../dgusm")]
    basedir: PathBuf,

    /// Only list one kind of resource
    #[arg(long, value_enum)]
    only: Option<Section>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn wants(&self, section: Section) -> bool {
        self.only.map_or(true, |only| only == section)
    }
}

fn generate_listing(firmware: &Firmware, args: &Args) -> Result<String> {
    let mut output = String::new();

    if args.wants(Section::Touch) {
        for record in &firmware.touch {
            writeln!(output, "{}", record)?;
        }
    }

    if args.wants(Section::Display) {
        for record in &firmware.display {
            writeln!(output, "{}", record)?;
        }
    }

    if args.wants(Section::Icons) {
        for lib in firmware.icon_libs.values() {
            writeln!(output, "{}", lib)?;
            for icon in &lib.icons {
                writeln!(output, "   {}", icon)?;
            }
        }
    }

    if args.wants(Section::Pages) {
        for page in firmware.pages.values() {
            writeln!(output, "{}", page)?;
        }
    }

    Ok(output)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let firmware = Firmware::load(&args.basedir)
        .with_context(|| format!("Failed to load firmware from {}", args.basedir.display()))?;

    print!("{}", generate_listing(&firmware, &args)?);
    Ok(())
}

// crates/dgus-check/src/lib.rs
pub mod checks;
pub mod config;
pub mod context;
pub mod ram;
pub mod report;

pub use checks::*;
pub use config::*;
pub use context::*;
pub use ram::*;
pub use report::*;

use dgus_core::Firmware;
use tracing::info;

/// Run every check against `firmware` and collect the findings.
pub fn validate(firmware: &Firmware, config: &ValidatorConfig) -> Report {
    let ctx = ValidationContext::new(firmware, config);
    let mut report = Report::new();
    checks::run_all(&default_checks(), &ctx, &mut report);

    let records = firmware.touch.len() + firmware.display.len();
    info!("validated {} records, {} bound VP regions", records, ctx.ram.len());
    let summary = format!(
        "{} touch records, {} display records, {} VP regions: {} errors, {} warnings",
        firmware.touch.len(),
        firmware.display.len(),
        ctx.ram.len(),
        report.count(Severity::Error),
        report.count(Severity::Warning)
    );
    report.info(DiagnosticKind::Summary, summary);
    report
}

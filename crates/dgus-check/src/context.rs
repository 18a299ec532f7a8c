// crates/dgus-check/src/context.rs
use dgus_core::Firmware;

use crate::{RamModel, ValidatorConfig};

/// Everything a check may look at. Built once per run and shared read-only.
pub struct ValidationContext<'a> {
    pub firmware: &'a Firmware,
    pub config: &'a ValidatorConfig,
    pub ram: RamModel<'a>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(firmware: &'a Firmware, config: &'a ValidatorConfig) -> Self {
        Self {
            firmware,
            config,
            ram: RamModel::build(firmware),
        }
    }
}

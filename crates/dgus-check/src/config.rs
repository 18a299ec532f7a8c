// crates/dgus-check/src/config.rs
use dgus_core::Coord;

/// Limits of the target controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Size of the VP register RAM in bytes.
    pub total_ram: u32,
    /// Highest page id the controller can address.
    pub max_page: u16,
    pub resolution: Coord,
    pub max_icon_dims: Coord,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            total_ram: 4096,
            max_page: 373,
            resolution: Coord::new(480, 272),
            max_icon_dims: Coord::new(255, 255),
        }
    }
}

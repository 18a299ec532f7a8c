// crates/dgus-core/src/types.rs
use std::fmt;

use rgb565::Rgb565;

use crate::colors;

/// Page (picture) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pic(pub u16);

impl Pic {
    pub fn id(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Pic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad the whole token so columns line up like the id alone would
        f.pad(&format!("P{:<3}", self.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: u16,
    pub y: u16,
}

impl Coord {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Componentwise `self <= other`.
    pub fn fits_within(self, other: Coord) -> bool {
        self.x <= other.x && self.y <= other.y
    }

    /// Componentwise difference, clamped at zero.
    pub fn saturating_sub(self, other: Coord) -> Coord {
        Coord::new(self.x.saturating_sub(other.x), self.y.saturating_sub(other.y))
    }
}

impl From<(u16, u16)> for Coord {
    fn from((x, y): (u16, u16)) -> Self {
        Coord::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:3},{:3})", self.x, self.y)
    }
}

/// Axis-aligned rectangle, `start` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Area {
    pub start: Coord,
    pub end: Coord,
}

impl Area {
    pub const fn new(start: Coord, end: Coord) -> Self {
        Self { start, end }
    }

    pub const fn point(at: Coord) -> Self {
        Self { start: at, end: at }
    }

    pub fn size(&self) -> Coord {
        self.end.saturating_sub(self.start)
    }

    pub fn is_inverted(&self) -> bool {
        !self.start.fits_within(self.end)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{} +{}", self.start, self.size())
    }
}

/// RGB565 color as stored in the controller resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u16);

impl Color {
    /// Expand to 8 bits per channel by replicating the high bits into the low ones.
    pub fn rgb(self) -> (u8, u8, u8) {
        let (r, g, b) = Rgb565::unpack_565(self.0);
        ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }

    pub fn hex24(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    pub fn closest_name(self) -> &'static str {
        colors::closest_name(self.rgb())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.hex24(), self.closest_name())
    }
}

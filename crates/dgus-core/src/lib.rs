// crates/dgus-core/src/lib.rs
pub mod colors;
pub mod decode;
pub mod display;
pub mod firmware;
pub mod iconlib;
pub mod kind;
pub mod pages;
pub mod resources;
pub mod touch;
pub mod types;
pub mod view;
pub mod vp;

pub use decode::*;
pub use display::*;
pub use firmware::*;
pub use iconlib::*;
pub use kind::*;
pub use pages::*;
pub use resources::*;
pub use touch::*;
pub use types::*;
pub use view::*;
pub use vp::*;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DgusError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no resource matching '{pattern}' in {}", .dir.display())]
    MissingResource { pattern: &'static str, dir: PathBuf },

    #[error("bad resource pattern '{pattern}': {source}")]
    Pattern {
        pattern: &'static str,
        #[source]
        source: globset::Error,
    },

    #[error("resource name does not follow '<number>_<name>': {}", .0.display())]
    BadResourceName(PathBuf),

    #[error("malformed page bitmap {}: {reason}", .path.display())]
    BadBitmap { path: PathBuf, reason: String },

    #[error("{}: {source}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: Box<DgusError>,
    },

    #[error("touch file should end in 0xffff, found 0x{found:04x}")]
    MissingEndSentinel { found: u16 },

    #[error("{shape} record at 0x{offset:x} truncated: needs {needed} bytes, {available} left")]
    Truncated {
        shape: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("bad magic: 0x{found:02x} off 0x{offset:x}")]
    BadMagic { offset: usize, found: u8 },

    #[error("unknown {family} type 0x{code:02x} off 0x{offset:x}")]
    UnknownType {
        family: &'static str,
        offset: usize,
        code: u8,
    },

    #[error("unknown {family} subtype 0x{code:02x} off 0x{offset:x}")]
    UnknownSubtype {
        family: &'static str,
        offset: usize,
        code: u8,
    },

    #[error("SP not supported yet: 0x{sp:04x} off 0x{offset:x}")]
    UnsupportedSp { offset: usize, sp: u16 },

    #[error("{shape} off 0x{offset:x}: {what} not supported yet")]
    Unsupported {
        shape: &'static str,
        offset: usize,
        what: String,
    },

    #[error("{shape} has bad size 0x{size:x}")]
    BadRecordSize { shape: &'static str, size: usize },

    #[error("{shape} off 0x{offset:x}: {source}")]
    Vp {
        shape: &'static str,
        offset: usize,
        #[source]
        source: VpError,
    },
}

impl DgusError {
    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        DgusError::Resource {
            path: path.into(),
            source: Box::new(self),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DgusError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DgusError>;

// crates/dgus-core/src/iconlib.rs
//! Icon libraries (`<id>_<name>.ico`): a table of 8-byte descriptors at the
//! start of the file, terminated by the first descriptor without data.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use crate::{
    decode_record, Color, Coord, DgusError, Dispatch, Layout, RecordFamily, RecordView, Result,
};

pub const ICON_DESCRIPTOR_LEN: usize = 8;
/// Descriptor table never extends past this many bytes.
pub const ICON_TABLE_LIMIT: usize = 256 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDescriptor {
    pub id: usize,
    pub size: Coord,
    pub data_offset: u32,
    pub transparency: Color,
}

impl IconDescriptor {
    pub fn is_valid(&self) -> bool {
        self.data_offset != 0
    }
}

impl fmt::Display for IconDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:3}: {} transparency {}", self.id, self.size, self.transparency)
    }
}

static DESCRIPTOR: Layout<IconDescriptor> = Layout {
    name: "IconDescriptor",
    size: ICON_DESCRIPTOR_LEN,
    decode: decode_descriptor,
};

impl RecordFamily for IconDescriptor {
    const FAMILY: &'static str = "icon";
    const HEADER_LEN: usize = ICON_DESCRIPTOR_LEN;
    const TYPE_FIELD: usize = 0;
    const LEAF_SIZES: &'static [usize] = &[ICON_DESCRIPTOR_LEN];
    const CHAINED_SIZES: &'static [usize] = &[];

    // single shape, the "type" byte is the low width byte
    fn dispatch(_code: u8) -> Option<Dispatch<Self>> {
        Some(Dispatch::Leaf(&DESCRIPTOR))
    }
}

fn decode_descriptor(view: &RecordView<'_>) -> Result<IconDescriptor> {
    let packed = view.u32(2);
    let x_high = ((packed >> 30) & 0x3) as u16;
    let y_high = ((packed >> 28) & 0x3) as u16;
    let size = Coord::new(
        u16::from(view.u8(0)) | x_high << 8,
        u16::from(view.u8(1)) | y_high << 8,
    );
    Ok(IconDescriptor {
        id: view.offset() / ICON_DESCRIPTOR_LEN,
        size,
        data_offset: packed & 0x0fff_ffff,
        transparency: view.color(6),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLibrary {
    pub id: u32,
    pub name: String,
    pub icons: Vec<IconDescriptor>,
}

impl IconLibrary {
    /// Reads descriptors until an invalid one, the end of `data` or the table limit.
    pub fn parse(id: u32, name: impl Into<String>, data: &[u8]) -> Result<Self> {
        let mut icons = Vec::new();
        let limit = data.len().min(ICON_TABLE_LIMIT);
        let mut offset = 0;
        while offset < limit {
            let decoded = decode_record::<IconDescriptor>(data, offset)?;
            if !decoded.record.is_valid() {
                break;
            }
            offset += decoded.size;
            icons.push(decoded.record);
        }
        Ok(IconLibrary {
            id,
            name: name.into(),
            icons,
        })
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl fmt::Display for IconLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "iconlib {} '{}' {} icons", self.id, self.name, self.icons.len())
    }
}

static LIBRARY_STEM: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();

/// Splits a `<id>_<name>` file stem.
pub fn parse_library_stem(path: &Path) -> Result<(u32, String)> {
    let bad_name = || DgusError::BadResourceName(path.to_path_buf());
    let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(bad_name)?;
    let re = LIBRARY_STEM
        .get_or_init(|| Regex::new(r"^(\d+)_(.+)$"))
        .as_ref()
        .map_err(|_| bad_name())?;
    let caps = re.captures(stem).ok_or_else(bad_name)?;
    let id = caps[1].parse().map_err(|_| bad_name())?;
    Ok((id, caps[2].to_string()))
}

pub fn load_icon_library(path: &Path) -> Result<IconLibrary> {
    let (id, name) = parse_library_stem(path)?;
    let data = std::fs::read(path).map_err(|e| DgusError::io(path, e))?;
    let lib = IconLibrary::parse(id, name, &data).map_err(|e| e.in_file(path))?;
    info!("{}: {}", path.display(), lib);
    for icon in &lib.icons {
        debug!("  {}", icon);
    }
    Ok(lib)
}

// crates/dgus-core/src/pages.rs
//! Page bitmaps (`<pic>_<name>.bmp`). Only the header is consumed.

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use image::codecs::bmp::BmpDecoder;
use image::{ColorType, ImageDecoder};
use tracing::info;

use crate::{Coord, DgusError, Pic, Result};

/// Offset of `biCompression` in a BITMAPINFOHEADER-style header.
const BMP_COMPRESSION_FIELD: usize = 30;
const BMP_INFO_HEADER_MIN: u32 = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub pic: Pic,
    pub name: String,
    pub size: Coord,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' {}", self.pic, self.name, self.size)
    }
}

fn le_u32(data: &[u8], at: usize) -> Option<u32> {
    let bytes = data.get(at..at + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Pixel size of an uncompressed RGB bitmap.
pub fn bitmap_size(path: &Path, data: &[u8]) -> Result<Coord> {
    let bad = |reason: String| DgusError::BadBitmap {
        path: path.to_path_buf(),
        reason,
    };

    if !data.starts_with(b"BM") {
        return Err(bad("not a BMP file".into()));
    }
    let header_size = le_u32(data, 14).ok_or_else(|| bad("truncated header".into()))?;
    if header_size >= BMP_INFO_HEADER_MIN {
        let compression = le_u32(data, BMP_COMPRESSION_FIELD)
            .ok_or_else(|| bad("truncated header".into()))?;
        if compression != 0 {
            return Err(bad(format!("compression {} instead of uncompressed RGB", compression)));
        }
    }

    let decoder = BmpDecoder::new(Cursor::new(data)).map_err(|e| bad(e.to_string()))?;
    if decoder.color_type() != ColorType::Rgb8 {
        return Err(bad(format!("color type {:?} instead of RGB", decoder.color_type())));
    }
    let (w, h) = decoder.dimensions();
    let w = u16::try_from(w).map_err(|_| bad(format!("width {} too large", w)))?;
    let h = u16::try_from(h).map_err(|_| bad(format!("height {} too large", h)))?;
    Ok(Coord::new(w, h))
}

/// Splits a `<pic>_<name>` stem: three digits, a separator, the name.
pub fn parse_page_stem(path: &Path) -> Result<(Pic, String)> {
    let bad_name = || DgusError::BadResourceName(path.to_path_buf());
    let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(bad_name)?;
    let digits = stem.get(..3).ok_or_else(bad_name)?;
    let name = stem.get(4..).ok_or_else(bad_name)?;
    let pic = digits.parse().map_err(|_| bad_name())?;
    Ok((Pic(pic), name.to_string()))
}

pub fn load_page(path: &Path) -> Result<Page> {
    let (pic, name) = parse_page_stem(path)?;
    let data = std::fs::read(path).map_err(|e| DgusError::io(path, e))?;
    let size = bitmap_size(path, &data)?;
    let page = Page { pic, name, size };
    info!("{}: {}", path.display(), page);
    Ok(page)
}

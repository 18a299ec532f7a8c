// crates/dgus-core/src/display.rs
//! Display variable resource (`14*.bin`): 32-byte slots, 64 per page.

use std::fmt;
use std::path::Path;

use tracing::{debug, info};

use crate::{
    decode_record, Area, Color, Coord, DgusError, Dispatch, Layout, Pic, RecordFamily, RecordKind,
    RecordView, Result, VpError, VpRegion,
};

pub const DISPLAY_RECORD_LEN: usize = 0x20;
pub const DISPLAY_HEADER_LEN: usize = 8;
pub const DISPLAY_MAGIC: u8 = 0x5a;
/// Bytes of display configuration owned by one page.
pub const DISPLAY_PAGE_STRIDE: usize = 0x800;

const TYPE_FIELD: usize = 1;
const BODY: usize = DISPLAY_HEADER_LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayHeader {
    pub offset: usize,
    pub pic: Pic,
    pub type_code: u8,
    pub desc_len_words: u16,
    pub vp_word: u16,
}

impl DisplayHeader {
    fn read(view: &RecordView<'_>) -> Self {
        DisplayHeader {
            offset: view.offset(),
            pic: Pic((view.offset() / DISPLAY_PAGE_STRIDE) as u16),
            type_code: view.u8(TYPE_FIELD),
            desc_len_words: view.u16(4),
            vp_word: view.u16(6),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub pos: Coord,
    pub val_min: u16,
    pub val_max: u16,
    pub icon_min: u16,
    pub icon_max: u16,
    pub icon_lib: u8,
    pub opaque: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAnimation {
    pub pic_begin: Pic,
    pub pic_end: Pic,
    pub frame_time_8ms: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySlider {
    pub val_min: u16,
    pub val_max: u16,
    pub xy_begin: u16,
    pub xy_end: u16,
    pub icon: u16,
    pub yx: u16,
    pub vertical: bool,
    pub icon_lib: u8,
    pub opaque: bool,
    pub vp_format: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitIcon {
    pub vp_aux_ptr_word: u16,
    pub aux_pointer: VpRegion,
    pub bitmask: u16,
    pub mode: u8,
    pub arrangement: u8,
    pub opaque: bool,
    pub icon_lib: u8,
    pub icon0s: u16,
    pub icon0e: u16,
    pub icon1s: u16,
    pub icon1e: u16,
    pub pos: Coord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numeric {
    pub text_pos: Coord,
    pub color: Color,
    pub font: u8,
    pub x_px: u8,
    pub y_px: u8,
    pub alignment: u8,
    pub int_digits: u8,
    pub dec_digits: u8,
    pub vp_format: u8,
    pub suffix: String,
}

impl Numeric {
    /// Glyph cells the firmware reserves for the value: at most one for the
    /// integer part, then the decimals and the point.
    pub fn num_chars(&self) -> u16 {
        let point = u16::from(self.dec_digits > 0);
        u16::from(self.int_digits.min(1)) + u16::from(self.dec_digits) + point
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub text_pos: Coord,
    pub color: Color,
    pub length: u16,
    pub font_ascii: u8,
    pub font_nonascii: u8,
    pub x_px: u8,
    pub y_px: u8,
    pub monospace: bool,
    pub encoding: u8,
    pub x_kerning_px: u8,
    pub y_tracking_px: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    pub y_center: u16,
    pub value_center: u16,
    pub color: Color,
    pub y_scale256th: u16,
    pub channel: u8,
    pub x_spacing: u8,
}

impl Curve {
    pub fn y_scale(&self) -> f64 {
        f64::from(self.y_scale256th) / 256.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayBody {
    Icon(Icon),
    ImageAnimation(ImageAnimation),
    Slider(DisplaySlider),
    BitIcon(BitIcon),
    Numeric(Numeric),
    Text(Text),
    Curve(Curve),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub header: DisplayHeader,
    pub area: Area,
    pub vp: VpRegion,
    pub body: DisplayBody,
}

impl DisplayRecord {
    pub fn pic(&self) -> Pic {
        self.header.pic
    }

    pub fn offset(&self) -> usize {
        self.header.offset
    }

    pub fn kind(&self) -> RecordKind {
        match self.body {
            DisplayBody::Icon(_) => RecordKind::Icon,
            DisplayBody::ImageAnimation(_) => RecordKind::ImageAnimation,
            DisplayBody::Slider(_) => RecordKind::DisplaySlider,
            DisplayBody::BitIcon(_) => RecordKind::BitIcon,
            DisplayBody::Numeric(_) => RecordKind::Numeric,
            DisplayBody::Text(_) => RecordKind::Text,
            DisplayBody::Curve(_) => RecordKind::Curve,
        }
    }

    /// Auxiliary pointer region, bit icons only.
    pub fn aux_pointer(&self) -> Option<VpRegion> {
        match &self.body {
            DisplayBody::BitIcon(bit_icon) => Some(bit_icon.aux_pointer),
            _ => None,
        }
    }

    /// Icon library and the icon indices the record may show.
    pub fn icon_refs(&self) -> Option<(u8, Vec<(&'static str, u16)>)> {
        match &self.body {
            DisplayBody::Icon(icon) => Some((
                icon.icon_lib,
                vec![("icon_min", icon.icon_min), ("icon_max", icon.icon_max)],
            )),
            DisplayBody::Slider(slider) => Some((slider.icon_lib, vec![("icon", slider.icon)])),
            DisplayBody::BitIcon(bit_icon) => Some((
                bit_icon.icon_lib,
                vec![
                    ("icon0s", bit_icon.icon0s),
                    ("icon0e", bit_icon.icon0e),
                    ("icon1s", bit_icon.icon1s),
                    ("icon1e", bit_icon.icon1e),
                ],
            )),
            _ => None,
        }
    }

    pub fn font_refs(&self) -> Vec<(&'static str, u8)> {
        match &self.body {
            DisplayBody::Numeric(numeric) => vec![("font", numeric.font)],
            DisplayBody::Text(text) => vec![
                ("font_ascii", text.font_ascii),
                ("font_nonascii", text.font_nonascii),
            ],
            _ => Vec::new(),
        }
    }

    /// Pages referenced by the record besides its own.
    pub fn pic_refs(&self) -> Vec<Pic> {
        match &self.body {
            DisplayBody::ImageAnimation(anim) => vec![anim.pic_begin, anim.pic_end],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for DisplayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let DisplayBody::ImageAnimation(anim) = &self.body {
            return write!(
                f,
                "{} {} {} to {} every {} ms",
                self.pic(),
                self.kind(),
                anim.pic_begin,
                anim.pic_end,
                u32::from(anim.frame_time_8ms) * 8
            );
        }

        write!(f, "{} {} {:<7} {}", self.pic(), self.area, self.kind(), self.vp)?;
        match &self.body {
            DisplayBody::Numeric(numeric) => write!(
                f,
                " {}.{} digits {}x{}px suffix '{}' {}",
                numeric.int_digits,
                numeric.dec_digits,
                numeric.x_px,
                numeric.y_px,
                numeric.suffix,
                numeric.color
            ),
            DisplayBody::Text(text) => write!(
                f,
                " {:2} chars {}x{}px {} {}",
                self.vp.size,
                text.x_px,
                text.y_px,
                if text.monospace { "monospace" } else { "variable" },
                text.color
            ),
            DisplayBody::Curve(curve) => write!(
                f,
                " y_center {}@{} scale {}x{:.3} channel {} {}",
                curve.value_center,
                curve.y_center,
                curve.x_spacing,
                curve.y_scale(),
                curve.channel,
                curve.color
            ),
            _ => Ok(()),
        }
    }
}

static ICON: Layout<DisplayRecord> = Layout {
    name: "Icon",
    size: DISPLAY_RECORD_LEN,
    decode: decode_icon,
};

static IMAGE_ANIMATION: Layout<DisplayRecord> = Layout {
    name: "ImageAnimation",
    size: DISPLAY_RECORD_LEN,
    decode: decode_image_animation,
};

static SLIDER: Layout<DisplayRecord> = Layout {
    name: "Slider",
    size: DISPLAY_RECORD_LEN,
    decode: decode_slider,
};

static BIT_ICON: Layout<DisplayRecord> = Layout {
    name: "BitIcon",
    size: DISPLAY_RECORD_LEN,
    decode: decode_bit_icon,
};

static NUMERIC: Layout<DisplayRecord> = Layout {
    name: "Numeric",
    size: DISPLAY_RECORD_LEN,
    decode: decode_numeric,
};

static TEXT: Layout<DisplayRecord> = Layout {
    name: "Text",
    size: DISPLAY_RECORD_LEN,
    decode: decode_text,
};

static CURVE: Layout<DisplayRecord> = Layout {
    name: "Curve",
    size: DISPLAY_RECORD_LEN,
    decode: decode_curve,
};

impl RecordFamily for DisplayRecord {
    const FAMILY: &'static str = "display";
    const HEADER_LEN: usize = DISPLAY_HEADER_LEN;
    const TYPE_FIELD: usize = TYPE_FIELD;
    const LEAF_SIZES: &'static [usize] = &[DISPLAY_RECORD_LEN];
    const CHAINED_SIZES: &'static [usize] = &[];

    fn dispatch(code: u8) -> Option<Dispatch<Self>> {
        let layout = match code {
            0x00 => &ICON,
            0x02 => &SLIDER,
            0x04 => &IMAGE_ANIMATION,
            0x06 => &BIT_ICON,
            0x10 => &NUMERIC,
            0x11 => &TEXT,
            0x20 => &CURVE,
            _ => return None,
        };
        Some(Dispatch::Leaf(layout))
    }

    fn check_header(header: &RecordView<'_>) -> Result<()> {
        let valid = header.u8(0);
        if valid != DISPLAY_MAGIC {
            return Err(DgusError::BadMagic {
                offset: header.offset(),
                found: valid,
            });
        }
        let sp = header.u16(2);
        if sp != 0xffff {
            return Err(DgusError::UnsupportedSp {
                offset: header.offset(),
                sp,
            });
        }
        Ok(())
    }
}

fn vp_error(view: &RecordView<'_>, shape: &'static str) -> impl FnOnce(VpError) -> DgusError {
    let offset = view.offset();
    move |source| DgusError::Vp {
        shape,
        offset,
        source,
    }
}

fn record(view: &RecordView<'_>, area: Area, vp: VpRegion, body: DisplayBody) -> DisplayRecord {
    DisplayRecord {
        header: DisplayHeader::read(view),
        area,
        vp,
        body,
    }
}

fn decode_icon(view: &RecordView<'_>) -> Result<DisplayRecord> {
    let icon = Icon {
        pos: view.coord(BODY),
        val_min: view.u16(BODY + 4),
        val_max: view.u16(BODY + 6),
        icon_min: view.u16(BODY + 8),
        icon_max: view.u16(BODY + 10),
        icon_lib: view.u8(BODY + 12),
        opaque: view.flag(BODY + 13),
    };
    let vp = VpRegion::word(view.u16(6));
    Ok(record(view, Area::point(icon.pos), vp, DisplayBody::Icon(icon)))
}

fn decode_image_animation(view: &RecordView<'_>) -> Result<DisplayRecord> {
    let anim = ImageAnimation {
        pic_begin: view.pic(BODY),
        pic_end: view.pic(BODY + 2),
        frame_time_8ms: view.u8(BODY + 4),
    };
    Ok(record(
        view,
        Area::default(),
        VpRegion::NONE,
        DisplayBody::ImageAnimation(anim),
    ))
}

fn decode_slider(view: &RecordView<'_>) -> Result<DisplayRecord> {
    let adj_left_top = view.u8(BODY + 12);
    if adj_left_top != 0 {
        return Err(DgusError::Unsupported {
            shape: SLIDER.name,
            offset: view.offset(),
            what: format!("adj_left_top {}", adj_left_top),
        });
    }

    let slider = DisplaySlider {
        val_min: view.u16(BODY),
        val_max: view.u16(BODY + 2),
        xy_begin: view.u16(BODY + 4),
        xy_end: view.u16(BODY + 6),
        icon: view.u16(BODY + 8),
        yx: view.u16(BODY + 10),
        vertical: view.flag(BODY + 13),
        icon_lib: view.u8(BODY + 14),
        opaque: view.flag(BODY + 15),
        vp_format: view.u16(BODY + 16),
    };

    let area = if slider.vertical {
        Area::new(
            Coord::new(slider.yx, slider.xy_begin),
            Coord::new(slider.yx, slider.xy_end),
        )
    } else {
        Area::new(
            Coord::new(slider.xy_begin, slider.yx),
            Coord::new(slider.xy_end, slider.yx),
        )
    };

    let format = u8::try_from(slider.vp_format).map_err(|_| VpError::InvalidFormat {
        context: "standard",
        code: slider.vp_format,
    });
    let vp = format
        .and_then(|code| VpRegion::from_standard_format(view.u16(6), code))
        .map_err(vp_error(view, SLIDER.name))?;

    Ok(record(view, area, vp, DisplayBody::Slider(slider)))
}

fn decode_bit_icon(view: &RecordView<'_>) -> Result<DisplayRecord> {
    let spacing = view.u16(BODY + 20);
    if spacing != 0 {
        return Err(DgusError::Unsupported {
            shape: BIT_ICON.name,
            offset: view.offset(),
            what: format!("icon spacing {}", spacing),
        });
    }

    let vp_aux_ptr_word = view.u16(BODY);
    let bit_icon = BitIcon {
        vp_aux_ptr_word,
        aux_pointer: VpRegion::aux_pointer(vp_aux_ptr_word),
        bitmask: view.u16(BODY + 2),
        mode: view.u8(BODY + 4),
        arrangement: view.u8(BODY + 5),
        opaque: view.flag(BODY + 6),
        icon_lib: view.u8(BODY + 7),
        icon0s: view.u16(BODY + 8),
        icon0e: view.u16(BODY + 10),
        icon1s: view.u16(BODY + 12),
        icon1e: view.u16(BODY + 14),
        pos: view.coord(BODY + 16),
    };
    let vp = VpRegion::from_bitmask(view.u16(6), bit_icon.bitmask)
        .map_err(vp_error(view, BIT_ICON.name))?;

    Ok(record(view, Area::point(bit_icon.pos), vp, DisplayBody::BitIcon(bit_icon)))
}

fn decode_numeric(view: &RecordView<'_>) -> Result<DisplayRecord> {
    let x_px = view.u8(BODY + 7);
    let suffix_len = usize::from(view.u8(BODY + 12)).min(11);
    let numeric = Numeric {
        text_pos: view.coord(BODY),
        color: view.color(BODY + 4),
        font: view.u8(BODY + 6),
        x_px,
        y_px: x_px.saturating_mul(2),
        alignment: view.u8(BODY + 8),
        int_digits: view.u8(BODY + 9),
        dec_digits: view.u8(BODY + 10),
        vp_format: view.u8(BODY + 11),
        suffix: String::from_utf8_lossy(view.bytes(BODY + 13, suffix_len)).into_owned(),
    };

    let start = numeric.text_pos;
    let width = u16::from(numeric.x_px).saturating_mul(numeric.num_chars());
    let end = Coord::new(
        start.x.saturating_add(width),
        start.y.saturating_add(u16::from(numeric.y_px)),
    );
    let vp = VpRegion::from_numeric_format(view.u16(6), numeric.vp_format)
        .map_err(vp_error(view, NUMERIC.name))?;

    Ok(record(view, Area::new(start, end), vp, DisplayBody::Numeric(numeric)))
}

fn decode_text(view: &RecordView<'_>) -> Result<DisplayRecord> {
    let flags = view.u8(BODY + 20);
    let text = Text {
        text_pos: view.coord(BODY),
        color: view.color(BODY + 4),
        length: view.u16(BODY + 14),
        font_ascii: view.u8(BODY + 16),
        font_nonascii: view.u8(BODY + 17),
        x_px: view.u8(BODY + 18),
        y_px: view.u8(BODY + 19),
        monospace: flags & 0x80 != 0,
        encoding: flags & 0x7f,
        x_kerning_px: view.u8(BODY + 21),
        y_tracking_px: view.u8(BODY + 22),
    };
    let vp = VpRegion::text(view.u16(6), u32::from(text.length));
    Ok(record(view, view.area(BODY + 6), vp, DisplayBody::Text(text)))
}

fn decode_curve(view: &RecordView<'_>) -> Result<DisplayRecord> {
    let curve = Curve {
        y_center: view.u16(BODY + 8),
        value_center: view.u16(BODY + 10),
        color: view.color(BODY + 12),
        y_scale256th: view.u16(BODY + 14),
        channel: view.u8(BODY + 16),
        x_spacing: view.u8(BODY + 17),
    };
    Ok(record(view, view.area(BODY), VpRegion::NONE, DisplayBody::Curve(curve)))
}

/// Decodes a whole display configuration buffer.
pub struct DisplayParser<'a> {
    data: &'a [u8],
}

impl<'a> DisplayParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn parse(&self) -> Result<Vec<DisplayRecord>> {
        let mut records = Vec::new();
        let mut offset = 0;
        while offset < self.data.len() {
            if self.data[offset] == 0 {
                offset += DISPLAY_RECORD_LEN;
                continue;
            }
            let decoded = decode_record::<DisplayRecord>(self.data, offset)?;
            debug!("{:05x} {}", offset, decoded.record);
            offset += decoded.size;
            records.push(decoded.record);
        }
        Ok(records)
    }
}

pub fn load_display_file(path: &Path) -> Result<Vec<DisplayRecord>> {
    let data = std::fs::read(path).map_err(|e| DgusError::io(path, e))?;
    let records = DisplayParser::new(&data)
        .parse()
        .map_err(|e| e.in_file(path))?;
    info!("{}: {} display records", path.display(), records.len());
    Ok(records)
}

// crates/dgus-core/src/touch.rs
//! Touch configuration resource (`13*.bin`).
//!
//! A 16-byte touch area header carries a type byte: `0x00` numpad keys,
//! `0x01..=0x7f` keyboard keys and `0xfd`/`0xfe` touch controls, whose subtype
//! byte selects one of the 32/64-byte control layouts.

use std::fmt;
use std::path::Path;

use tracing::{debug, info};

use crate::{
    decode_record, Area, Color, Coord, DgusError, Dispatch, Layout, Pic, RecordFamily, RecordKind,
    RecordView, Result, VpRegion,
};

pub const TOUCH_HEADER_LEN: usize = 0x10;
pub const TOUCH_END_SENTINEL: u16 = 0xffff;

const TYPE_FIELD: usize = 14;
const SUBTYPE_FIELD: usize = 15;
const VP_WORD_FIELD: usize = 17;
const BODY: usize = 19;

/// Key code of a numpad or keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(pub u8);

impl Key {
    pub fn special_name(self) -> Option<&'static str> {
        match self.0 {
            0xf0 => Some("cancel"),
            0xf1 => Some("return"),
            0xf2 => Some("backspace"),
            0xf3 => Some("delete"),
            0xf4 => Some("capslock"),
            0xf7 => Some("left"),
            0xf8 => Some("right"),
            _ => None,
        }
    }

    fn is_printable(self) -> bool {
        self.0 == b' ' || self.0.is_ascii_graphic()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.special_name() {
            f.write_str(name)
        } else if self.is_printable() {
            write!(f, "{}", char::from(self.0))
        } else {
            write!(f, ":0x{:02x}", self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchHeader {
    pub offset: usize,
    pub pic: Pic,
    pub area: Area,
    pub pic_next: Pic,
    pub pic_press: Pic,
    pub type_code: u8,
    pub subtype: u8,
}

impl TouchHeader {
    fn read(view: &RecordView<'_>) -> Self {
        TouchHeader {
            offset: view.offset(),
            pic: view.pic(0),
            area: view.area(2),
            pic_next: view.pic(10),
            pic_press: view.pic(12),
            type_code: view.u8(TYPE_FIELD),
            subtype: view.u8(SUBTYPE_FIELD),
        }
    }
}

impl fmt::Display for TouchHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pic, self.area)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numpad {
    pub vp_format: u8,
    pub int_digits: u8,
    pub dec_digits: u8,
    pub cursor_pos: Coord,
    pub font_color: Color,
    pub font: u8,
    pub font_x: u8,
    pub cursor_white: bool,
    pub unmasked: bool,
    pub kbd_elsewhere: bool,
    pub kbd_pic: Pic,
    pub kbd_area: Area,
    pub kbd_pos: Coord,
    pub limits_en: bool,
    pub limit_min: i32,
    pub limit_max: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Increment {
    pub bit_mode: bool,
    pub vp_format: u8,
    pub add: bool,
    pub loop_range: bool,
    pub step: u16,
    pub min: u16,
    pub max: u16,
    pub disable_repeat: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchSlider {
    pub vp_format: u8,
    pub vertical: bool,
    pub track: Area,
    pub min: u16,
    pub max: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub bit_mode: bool,
    pub vp_format: u8,
    pub keycode: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pub vp_len_words: u8,
    pub modify: bool,
    pub font: u8,
    pub font_x: u8,
    pub font_y: u8,
    pub cursor_white: bool,
    pub color: Color,
    pub text_pos: Coord,
    pub use_len_prefix: bool,
    pub text_pos_end: Coord,
    pub kbd_elsewhere: bool,
    pub kbd_pic: Pic,
    pub kbd_area: Area,
    pub kbd_pos: Coord,
    pub unmasked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlBody {
    Numpad(Numpad),
    Increment(Increment),
    Slider(TouchSlider),
    Button(Button),
    Keyboard(Keyboard),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchControl {
    pub header: TouchHeader,
    pub vp_word: u16,
    pub vp: VpRegion,
    pub body: ControlBody,
}

impl TouchControl {
    pub fn kind(&self) -> RecordKind {
        match self.body {
            ControlBody::Numpad(_) => RecordKind::Numpad,
            ControlBody::Increment(_) => RecordKind::Increment,
            ControlBody::Slider(_) => RecordKind::TouchSlider,
            ControlBody::Button(_) => RecordKind::Button,
            ControlBody::Keyboard(_) => RecordKind::Keyboard,
        }
    }

    pub fn keycode(&self) -> Option<u16> {
        match &self.body {
            ControlBody::Button(button) => Some(button.keycode),
            _ => None,
        }
    }

    /// Font library indices used by this control, with their field names.
    pub fn font_refs(&self) -> Vec<(&'static str, u8)> {
        match &self.body {
            ControlBody::Numpad(numpad) => vec![("font", numpad.font)],
            ControlBody::Keyboard(keyboard) => vec![("font", keyboard.font)],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for TouchControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ctl:{:<9} {}", self.header, self.kind(), self.vp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TouchRecord {
    NumpadKey { header: TouchHeader, key: Key },
    KeyboardKey { header: TouchHeader, upper: Key, lower: Key },
    Control(TouchControl),
}

impl TouchRecord {
    pub fn header(&self) -> &TouchHeader {
        match self {
            TouchRecord::NumpadKey { header, .. } | TouchRecord::KeyboardKey { header, .. } => header,
            TouchRecord::Control(control) => &control.header,
        }
    }

    pub fn pic(&self) -> Pic {
        self.header().pic
    }

    pub fn area(&self) -> Area {
        self.header().area
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            TouchRecord::NumpadKey { .. } => RecordKind::NumpadKey,
            TouchRecord::KeyboardKey { .. } => RecordKind::KeyboardKey,
            TouchRecord::Control(control) => control.kind(),
        }
    }

    pub fn as_control(&self) -> Option<&TouchControl> {
        match self {
            TouchRecord::Control(control) => Some(control),
            _ => None,
        }
    }

    pub fn vp(&self) -> VpRegion {
        self.as_control().map(|control| control.vp).unwrap_or_default()
    }
}

impl fmt::Display for TouchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TouchRecord::NumpadKey { header, key } => write!(f, "{} numpad:{}", header, key),
            TouchRecord::KeyboardKey { header, upper, lower } => {
                write!(f, "{} keyboard:⇩{}⇧{}", header, lower, upper)
            }
            TouchRecord::Control(control) => fmt::Display::fmt(control, f),
        }
    }
}

static NUMPAD_KEY: Layout<TouchRecord> = Layout {
    name: "NumpadKey",
    size: TOUCH_HEADER_LEN,
    decode: decode_numpad_key,
};

static KEYBOARD_KEY: Layout<TouchRecord> = Layout {
    name: "KeyboardKey",
    size: TOUCH_HEADER_LEN,
    decode: decode_keyboard_key,
};

static NUMPAD: Layout<TouchRecord> = Layout {
    name: "Numpad",
    size: 0x40,
    decode: decode_numpad,
};

static INCREMENT: Layout<TouchRecord> = Layout {
    name: "Increment",
    size: 0x20,
    decode: decode_increment,
};

static SLIDER: Layout<TouchRecord> = Layout {
    name: "Slider",
    size: 0x20,
    decode: decode_slider,
};

static BUTTON: Layout<TouchRecord> = Layout {
    name: "Button",
    size: 0x20,
    decode: decode_button,
};

static KEYBOARD: Layout<TouchRecord> = Layout {
    name: "Keyboard",
    size: 0x40,
    decode: decode_keyboard,
};

static CONTROL_SUBTYPES: [(u8, &Layout<TouchRecord>); 5] = [
    (0x00, &NUMPAD),
    (0x02, &INCREMENT),
    (0x03, &SLIDER),
    (0x05, &BUTTON),
    (0x06, &KEYBOARD),
];

impl RecordFamily for TouchRecord {
    const FAMILY: &'static str = "touch";
    const HEADER_LEN: usize = TOUCH_HEADER_LEN;
    const TYPE_FIELD: usize = TYPE_FIELD;
    const LEAF_SIZES: &'static [usize] = &[TOUCH_HEADER_LEN];
    const CHAINED_SIZES: &'static [usize] = &[0x20, 0x30, 0x40];

    fn dispatch(code: u8) -> Option<Dispatch<Self>> {
        match code {
            0x00 => Some(Dispatch::Leaf(&NUMPAD_KEY)),
            0x01..=0x7f => Some(Dispatch::Leaf(&KEYBOARD_KEY)),
            0xfd | 0xfe => Some(Dispatch::Chain {
                field: SUBTYPE_FIELD,
                table: &CONTROL_SUBTYPES,
            }),
            _ => None,
        }
    }
}

fn decode_numpad_key(view: &RecordView<'_>) -> Result<TouchRecord> {
    let header = TouchHeader::read(view);
    let key = Key(header.subtype);
    Ok(TouchRecord::NumpadKey { header, key })
}

fn decode_keyboard_key(view: &RecordView<'_>) -> Result<TouchRecord> {
    let header = TouchHeader::read(view);
    let upper = Key(header.type_code);
    let lower = Key(header.subtype);
    Ok(TouchRecord::KeyboardKey { header, upper, lower })
}

fn control(
    view: &RecordView<'_>,
    shape: &'static str,
    vp: impl FnOnce(u16) -> std::result::Result<VpRegion, crate::VpError>,
    body: ControlBody,
) -> Result<TouchRecord> {
    let vp_word = view.u16(VP_WORD_FIELD);
    let vp = vp(vp_word).map_err(|source| DgusError::Vp {
        shape,
        offset: view.offset(),
        source,
    })?;
    Ok(TouchRecord::Control(TouchControl {
        header: TouchHeader::read(view),
        vp_word,
        vp,
        body,
    }))
}

fn decode_numpad(view: &RecordView<'_>) -> Result<TouchRecord> {
    let numpad = Numpad {
        vp_format: view.u8(BODY),
        int_digits: view.u8(BODY + 1),
        dec_digits: view.u8(BODY + 2),
        cursor_pos: view.coord(BODY + 3),
        font_color: view.color(BODY + 7),
        font: view.u8(BODY + 9),
        font_x: view.u8(BODY + 10),
        cursor_white: view.flag(BODY + 11),
        unmasked: view.flag(BODY + 12),
        kbd_elsewhere: view.flag(BODY + 14),
        kbd_pic: view.pic(BODY + 15),
        kbd_area: view.area(BODY + 17),
        kbd_pos: view.coord(BODY + 25),
        limits_en: view.flag(BODY + 30),
        limit_min: view.i32(BODY + 31),
        limit_max: view.i32(BODY + 35),
    };
    let format = numpad.vp_format;
    control(
        view,
        NUMPAD.name,
        |word| VpRegion::from_numeric_format(word, format),
        ControlBody::Numpad(numpad),
    )
}

fn decode_increment(view: &RecordView<'_>) -> Result<TouchRecord> {
    let (bit_mode, vp_format) = view.nibbles(BODY);
    let increment = Increment {
        bit_mode: bit_mode != 0,
        vp_format,
        add: view.flag(BODY + 1),
        loop_range: view.flag(BODY + 2),
        step: view.u16(BODY + 3),
        min: view.u16(BODY + 5),
        max: view.u16(BODY + 7),
        disable_repeat: view.flag(BODY + 9),
    };
    let bit_mode = increment.bit_mode;
    control(
        view,
        INCREMENT.name,
        |word| VpRegion::from_bit_or_standard(word, bit_mode, vp_format),
        ControlBody::Increment(increment),
    )
}

fn decode_slider(view: &RecordView<'_>) -> Result<TouchRecord> {
    let (vp_format, vertical) = view.nibbles(BODY);
    let slider = TouchSlider {
        vp_format,
        vertical: vertical != 0,
        track: view.area(BODY + 1),
        min: view.u16(BODY + 9),
        max: view.u16(BODY + 11),
    };
    control(
        view,
        SLIDER.name,
        |word| VpRegion::from_standard_format(word, vp_format),
        ControlBody::Slider(slider),
    )
}

fn decode_button(view: &RecordView<'_>) -> Result<TouchRecord> {
    let (bit_mode, vp_format) = view.nibbles(BODY);
    let button = Button {
        bit_mode: bit_mode != 0,
        vp_format,
        keycode: view.u16(BODY + 1),
    };
    let bit_mode = button.bit_mode;
    control(
        view,
        BUTTON.name,
        |word| VpRegion::from_bit_or_standard(word, bit_mode, vp_format),
        ControlBody::Button(button),
    )
}

fn decode_keyboard(view: &RecordView<'_>) -> Result<TouchRecord> {
    let keyboard = Keyboard {
        vp_len_words: view.u8(BODY),
        modify: view.flag(BODY + 1),
        font: view.u8(BODY + 2),
        font_x: view.u8(BODY + 3),
        font_y: view.u8(BODY + 4),
        cursor_white: view.flag(BODY + 5),
        color: view.color(BODY + 6),
        text_pos: view.coord(BODY + 8),
        use_len_prefix: view.flag(BODY + 12),
        text_pos_end: view.coord(BODY + 14),
        kbd_elsewhere: view.flag(BODY + 18),
        kbd_pic: view.pic(BODY + 19),
        kbd_area: view.area(BODY + 21),
        kbd_pos: view.coord(BODY + 30),
        unmasked: view.flag(BODY + 34),
    };
    let (len_words, len_prefix) = (keyboard.vp_len_words, keyboard.use_len_prefix);
    control(
        view,
        KEYBOARD.name,
        |word| VpRegion::keyboard_text(word, len_words, len_prefix),
        ControlBody::Keyboard(keyboard),
    )
}

/// Decodes a whole touch configuration buffer.
pub struct TouchParser<'a> {
    data: &'a [u8],
}

impl<'a> TouchParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn parse(&self) -> Result<Vec<TouchRecord>> {
        let len = self.data.len();
        let found = match self.data {
            [.., hi, lo] => u16::from_be_bytes([*hi, *lo]),
            _ => 0,
        };
        if len < 2 || found != TOUCH_END_SENTINEL {
            return Err(DgusError::MissingEndSentinel { found });
        }

        let mut records = Vec::new();
        let mut offset = 0;
        while offset + 2 < len {
            let decoded = decode_record::<TouchRecord>(self.data, offset)?;
            debug!("{:05x} {}", offset, decoded.record);
            offset += decoded.size;
            records.push(decoded.record);
        }
        Ok(records)
    }
}

pub fn load_touch_file(path: &Path) -> Result<Vec<TouchRecord>> {
    let data = std::fs::read(path).map_err(|e| DgusError::io(path, e))?;
    let records = TouchParser::new(&data)
        .parse()
        .map_err(|e| e.in_file(path))?;
    info!("{}: {} touch records", path.display(), records.len());
    Ok(records)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn touch_header(pic: u16, area: [u16; 4], type_code: u8, subtype: u8) -> Vec<u8> {
        let mut buf = Vec::with_capacity(TOUCH_HEADER_LEN);
        buf.extend_from_slice(&pic.to_be_bytes());
        for v in area {
            buf.extend_from_slice(&v.to_be_bytes());
        }
        buf.extend_from_slice(&0xffffu16.to_be_bytes());
        buf.extend_from_slice(&0xffffu16.to_be_bytes());
        buf.push(type_code);
        buf.push(subtype);
        buf
    }

    /// 32-byte control with the given subtype, VP word and body bytes.
    pub(crate) fn touch_control(pic: u16, subtype: u8, vp_word: u16, body: &[u8], size: usize) -> Vec<u8> {
        let mut buf = touch_header(pic, [10, 10, 60, 40], 0xfe, subtype);
        buf.push(0);
        buf.extend_from_slice(&vp_word.to_be_bytes());
        buf.extend_from_slice(body);
        buf.resize(size, 0);
        buf
    }

    pub(crate) fn button(pic: u16, vp_word: u16, format: u8, keycode: u16) -> Vec<u8> {
        let mut body = vec![format];
        body.extend_from_slice(&keycode.to_be_bytes());
        touch_control(pic, 0x05, vp_word, &body, 0x20)
    }

    fn decode(buf: &[u8]) -> Decoded<TouchRecord> {
        decode_record::<TouchRecord>(buf, 0).unwrap()
    }

    use crate::{ByteHalf, Decoded, VpError, VpKind};

    #[test]
    fn test_numpad_key() {
        let buf = touch_header(3, [0, 0, 20, 20], 0x00, b'7');
        let decoded = decode(&buf);
        assert_eq!(decoded.size, 16);
        assert_eq!(decoded.shape, "NumpadKey");
        assert_eq!(decoded.record.kind(), RecordKind::NumpadKey);
        assert_eq!(decoded.record.vp(), VpRegion::NONE);
        assert_eq!(decoded.record.to_string(), "P3   @(  0,  0) +( 20, 20) numpad:7");
    }

    #[test]
    fn test_keyboard_key() {
        let buf = touch_header(1, [0, 0, 20, 20], b'A', b'a');
        let decoded = decode(&buf);
        assert_eq!(decoded.size, 16);
        assert!(matches!(
            decoded.record,
            TouchRecord::KeyboardKey { upper: Key(b'A'), lower: Key(b'a'), .. }
        ));
        assert!(decoded.record.to_string().ends_with("keyboard:⇩a⇧A"));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key(0xf1).to_string(), "return");
        assert_eq!(Key(b'x').to_string(), "x");
        assert_eq!(Key(0x07).to_string(), ":0x07");
    }

    #[test]
    fn test_button_standard_and_bit_mode() {
        let decoded = decode(&button(0, 0x1000, 0x02, 0x0010));
        assert_eq!(decoded.size, 32);
        let control = decoded.record.as_control().unwrap();
        assert_eq!(control.kind(), RecordKind::Button);
        assert_eq!(control.keycode(), Some(0x0010));
        assert_eq!(control.vp, VpRegion { addr: 0x2001, size: 1, kind: VpKind::Byte(ByteHalf::Low) });

        let decoded = decode(&button(0, 0x1000, 0x1a, 0x0001));
        let control = decoded.record.as_control().unwrap();
        assert_eq!(control.vp, VpRegion { addr: 0x2000, size: 1, kind: VpKind::Bit(2) });
        assert_eq!(
            decoded.record.to_string(),
            "P0   @( 10, 10) +( 50, 30) ctl:Button    VP 2000 b2"
        );
    }

    #[test]
    fn test_increment_uses_nibbles() {
        let mut body = vec![0x00, 1, 0];
        body.extend_from_slice(&5u16.to_be_bytes());
        body.extend_from_slice(&0u16.to_be_bytes());
        body.extend_from_slice(&100u16.to_be_bytes());
        let decoded = decode(&touch_control(0, 0x02, 0x20, &body, 0x20));
        let control = decoded.record.as_control().unwrap();
        match &control.body {
            ControlBody::Increment(inc) => {
                assert!(!inc.bit_mode);
                assert!(inc.add);
                assert_eq!((inc.step, inc.min, inc.max), (5, 0, 100));
            }
            other => panic!("unexpected body {:?}", other),
        }
        assert_eq!(control.vp, VpRegion::word(0x20));
    }

    #[test]
    fn test_slider_track_and_format() {
        let mut body = vec![0x11];
        for v in [100u16, 200, 300, 220, 0, 50] {
            body.extend_from_slice(&v.to_be_bytes());
        }
        let decoded = decode(&touch_control(2, 0x03, 0x30, &body, 0x20));
        let control = decoded.record.as_control().unwrap();
        assert_eq!(control.kind(), RecordKind::TouchSlider);
        match &control.body {
            ControlBody::Slider(slider) => {
                assert!(slider.vertical);
                assert_eq!(slider.track, Area::new(Coord::new(100, 200), Coord::new(300, 220)));
                assert_eq!((slider.min, slider.max), (0, 50));
            }
            other => panic!("unexpected body {:?}", other),
        }
        assert_eq!(control.vp.kind, VpKind::Byte(ByteHalf::High));
    }

    #[test]
    fn test_numpad_is_64_bytes() {
        let mut body = vec![1, 4, 2];
        body.resize(45, 0);
        let decoded = decode(&touch_control(0, 0x00, 0x80, &body, 0x40));
        assert_eq!(decoded.size, 64);
        assert_eq!(decoded.record.vp(), VpRegion::dword(0x80));
    }

    #[test]
    fn test_keyboard_text_region() {
        let mut body = vec![0u8; 45];
        body[0] = 4; // vp_len_words
        body[12] = 1; // use_len_prefix
        let decoded = decode(&touch_control(0, 0x06, 0x100, &body, 0x40));
        assert_eq!(decoded.size, 64);
        let vp = decoded.record.vp();
        assert_eq!((vp.addr, vp.size), (0x1fe, 12));

        // no room for the length prefix below address zero
        let decoded = decode_record::<TouchRecord>(&touch_control(0, 0x06, 0, &body, 0x40), 0);
        assert!(matches!(
            decoded,
            Err(DgusError::Vp {
                source: VpError::AddressUnderflow(0),
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_type_and_subtype_are_fatal() {
        let buf = touch_header(0, [0, 0, 1, 1], 0x90, 0);
        assert!(matches!(
            decode_record::<TouchRecord>(&buf, 0),
            Err(DgusError::UnknownType { code: 0x90, .. })
        ));

        let buf = touch_control(0, 0x04, 0, &[], 0x20);
        assert!(matches!(
            decode_record::<TouchRecord>(&buf, 0),
            Err(DgusError::UnknownSubtype { code: 0x04, .. })
        ));
    }

    #[test]
    fn test_invalid_format_is_fatal() {
        let err = decode_record::<TouchRecord>(&button(0, 0x10, 0x03, 0), 0).unwrap_err();
        assert!(matches!(err, DgusError::Vp { shape: "Button", .. }));
    }

    #[test]
    fn test_layout_sizes_match_family() {
        for (_, layout) in CONTROL_SUBTYPES.iter() {
            assert!(layout.check_size(TouchRecord::CHAINED_SIZES).is_ok(), "{}", layout.name);
        }
        assert!(NUMPAD_KEY.check_size(TouchRecord::LEAF_SIZES).is_ok());
        assert!(KEYBOARD_KEY.check_size(TouchRecord::LEAF_SIZES).is_ok());
    }

    #[test]
    fn test_parser_requires_end_sentinel() {
        let mut data = button(0, 0x10, 0, 1);
        data.extend_from_slice(&[0xff, 0x00]);
        assert!(matches!(
            TouchParser::new(&data).parse(),
            Err(DgusError::MissingEndSentinel { found: 0xff00 })
        ));
        assert!(TouchParser::new(&[]).parse().is_err());
    }

    #[test]
    fn test_parser_walks_mixed_sizes() {
        let mut data = touch_header(0, [0, 0, 10, 10], 0x00, b'1');
        data.extend(button(0, 0x10, 0, 1));
        data.extend(touch_header(0, [0, 0, 10, 10], b'Q', b'q'));
        data.extend_from_slice(&[0xff, 0xff]);

        let records = TouchParser::new(&data).parse().unwrap();
        let kinds: Vec<_> = records.iter().map(TouchRecord::kind).collect();
        assert_eq!(
            kinds,
            vec![RecordKind::NumpadKey, RecordKind::Button, RecordKind::KeyboardKey]
        );
        assert_eq!(records[2].header().offset, 48);
    }

    #[test]
    fn test_decoding_twice_is_identical() {
        let data = button(4, 0x0123, 0x15, 7);
        let first = decode(&data);
        let second = decode(&data);
        assert_eq!(first, second);
        assert_eq!(first.record.vp(), second.record.vp());
    }
}

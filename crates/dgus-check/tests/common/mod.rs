// crates/dgus-check/tests/common/mod.rs
#![allow(dead_code)]

use dgus_core::{
    Color, Coord, DisplayParser, Firmware, IconDescriptor, IconLibrary, Page, Pic, TouchParser,
};

pub fn words(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

pub fn touch_header(pic: u16, area: [u16; 4], type_code: u8, subtype: u8) -> Vec<u8> {
    let mut buf = words(&[pic]);
    buf.extend(words(&area));
    buf.extend(words(&[0xffff, 0xffff]));
    buf.extend_from_slice(&[type_code, subtype]);
    buf
}

pub fn touch_control(pic: u16, subtype: u8, vp_word: u16, body: &[u8], size: usize) -> Vec<u8> {
    let mut buf = touch_header(pic, [10, 10, 60, 40], 0xfe, subtype);
    buf.push(0);
    buf.extend(words(&[vp_word]));
    buf.extend_from_slice(body);
    buf.resize(size, 0);
    buf
}

pub fn button(pic: u16, vp_word: u16, format: u8, keycode: u16) -> Vec<u8> {
    let mut body = vec![format];
    body.extend(words(&[keycode]));
    touch_control(pic, 0x05, vp_word, &body, 0x20)
}

pub fn increment(pic: u16, vp_word: u16, format: u8) -> Vec<u8> {
    let mut body = vec![format, 1, 0];
    body.extend(words(&[1, 0, 100]));
    touch_control(pic, 0x02, vp_word, &body, 0x20)
}

pub fn touch_slider(pic: u16, vp_word: u16, format: u8) -> Vec<u8> {
    let mut body = vec![format << 4];
    body.extend(words(&[10, 10, 200, 20, 0, 100]));
    touch_control(pic, 0x03, vp_word, &body, 0x20)
}

pub fn display_record(type_code: u8, vp_word: u16, body: &[u8]) -> Vec<u8> {
    let mut buf = vec![0x5a, type_code, 0xff, 0xff, 0x00, 0x0d];
    buf.extend(words(&[vp_word]));
    buf.extend_from_slice(body);
    buf.resize(0x20, 0);
    buf
}

pub fn numeric(vp_word: u16, format: u8) -> Vec<u8> {
    let mut body = words(&[20, 30, 0xffff]);
    body.extend_from_slice(&[0, 8, 0, 3, 1, format, 1, b'V']);
    display_record(0x10, vp_word, &body)
}

pub fn image_animation(pic_begin: u16, pic_end: u16) -> Vec<u8> {
    let mut body = words(&[pic_begin, pic_end]);
    body.push(25);
    display_record(0x04, 0, &body)
}

pub fn icon(vp_word: u16, icon_min: u16, icon_max: u16, lib: u8) -> Vec<u8> {
    let mut body = words(&[100, 50, 0, 1, icon_min, icon_max]);
    body.push(lib);
    display_record(0x00, vp_word, &body)
}

pub fn bit_icon(vp_word: u16, aux_word: u16, mask: u16, lib: u8) -> Vec<u8> {
    let mut body = words(&[aux_word, mask]);
    body.extend_from_slice(&[0, 0, 0, lib]);
    body.extend(words(&[0, 0, 0, 0, 40, 50]));
    display_record(0x06, vp_word, &body)
}

pub struct TextBox {
    pub vp_word: u16,
    pub size: (u16, u16),
    pub length: u16,
    pub glyph: (u8, u8),
    pub kerning: u8,
    pub tracking: u8,
    pub monospace: bool,
}

impl Default for TextBox {
    fn default() -> Self {
        TextBox {
            vp_word: 0x100,
            size: (100, 16),
            length: 10,
            glyph: (8, 16),
            kerning: 2,
            tracking: 0,
            monospace: true,
        }
    }
}

impl TextBox {
    pub fn bytes(&self) -> Vec<u8> {
        let (x, y) = (50, 100);
        let mut body = words(&[x, y, 0x0000]);
        body.extend(words(&[x, y, x + self.size.0, y + self.size.1]));
        body.extend(words(&[self.length]));
        body.extend_from_slice(&[0, 0, self.glyph.0, self.glyph.1]);
        body.push(if self.monospace { 0x80 } else { 0x00 });
        body.extend_from_slice(&[self.kerning, self.tracking]);
        display_record(0x11, self.vp_word, &body)
    }
}

pub fn icon_library(id: u32, count: usize) -> IconLibrary {
    IconLibrary {
        id,
        name: format!("lib{}", id),
        icons: (0..count)
            .map(|i| IconDescriptor {
                id: i,
                size: Coord::new(32, 32),
                data_offset: 0x1000 + i as u32 * 0x800,
                transparency: Color(0),
            })
            .collect(),
    }
}

/// Decodes the given records and registers full-screen pages for `pics`.
pub fn firmware(touch: &[Vec<u8>], display: &[Vec<u8>], pics: &[u16]) -> Firmware {
    let mut touch_data: Vec<u8> = touch.concat();
    touch_data.extend_from_slice(&[0xff, 0xff]);
    let display_data = display.concat();

    let mut firmware = Firmware {
        touch: TouchParser::new(&touch_data).parse().unwrap(),
        display: DisplayParser::new(&display_data).parse().unwrap(),
        ..Default::default()
    };
    for &pic in pics {
        firmware.pages.insert(
            Pic(pic),
            Page {
                pic: Pic(pic),
                name: format!("page{}", pic),
                size: Coord::new(480, 272),
            },
        );
    }
    firmware
}

// crates/dgus-check/src/checks.rs
//! The individual validation passes, run in a fixed order.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use dgus_core::{DisplayBody, Pic, TouchControl, VpKind};
use tracing::debug;

use crate::{is_exempt_pair, DiagnosticKind as Kind, Report, ValidationContext};

/// One validation pass over the decoded firmware
pub trait Check {
    fn name(&self) -> &'static str;

    /// Append any findings to `report`. Checks never abort the run.
    fn run(&self, ctx: &ValidationContext<'_>, report: &mut Report);
}

pub fn default_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(PageCheck),
        Box::new(IconSizeCheck),
        Box::new(RamSizeCheck),
        Box::new(OverlapCheck),
        Box::new(KeycodeCheck),
        Box::new(TextboxCheck),
        Box::new(QWordCheck),
        Box::new(PageUsageCheck),
        Box::new(IconUsageCheck),
        Box::new(EncodingCheck),
        Box::new(FontCheck),
        Box::new(AreaCheck),
    ]
}

pub struct PageCheck;

impl Check for PageCheck {
    fn name(&self) -> &'static str {
        "pages"
    }

    fn run(&self, ctx: &ValidationContext<'_>, report: &mut Report) {
        let max_page = ctx.config.max_page;
        if let Some(max) = ctx.firmware.pages.keys().next_back() {
            report.check(max.id() <= max_page, Kind::PageIdTooLarge, || {
                format!("page id {} too large, limit is {}", max.id(), max_page)
            });
        }
        for page in ctx.firmware.pages.values() {
            report.check(page.size == ctx.config.resolution, Kind::PageResolution, || {
                format!("resolution mismatch {}, expected {}", page, ctx.config.resolution)
            });
        }
    }
}

pub struct IconSizeCheck;

impl Check for IconSizeCheck {
    fn name(&self) -> &'static str {
        "icon sizes"
    }

    fn run(&self, ctx: &ValidationContext<'_>, report: &mut Report) {
        let limit = ctx.config.max_icon_dims;
        for lib in ctx.firmware.icon_libs.values() {
            for icon in &lib.icons {
                report.check(icon.size.fits_within(limit), Kind::IconTooLarge, || {
                    format!("icon {} in {} too large", icon, lib)
                });
            }
        }
    }
}

pub struct RamSizeCheck;

impl Check for RamSizeCheck {
    fn name(&self) -> &'static str {
        "RAM size"
    }

    fn run(&self, ctx: &ValidationContext<'_>, report: &mut Report) {
        let total = ctx.config.total_ram;
        for entry in ctx.ram.entries() {
            report.check(entry.vp.end() <= total, Kind::RamOverflow, || {
                format!(
                    "VP ends at 0x{:04x}, past end of RAM 0x{:04x}: [{}]",
                    entry.vp.end(),
                    total,
                    entry
                )
            });
        }
    }
}

/// Sweeps the address-ordered RAM model for overlapping regions.
pub struct OverlapCheck;

impl Check for OverlapCheck {
    fn name(&self) -> &'static str {
        "VP overlap"
    }

    fn run(&self, ctx: &ValidationContext<'_>, report: &mut Report) {
        for (prev, cur) in ctx.ram.adjacent() {
            if cur.vp.addr >= prev.vp.end() {
                continue;
            }

            if cur.is_aux_pointer() || prev.is_aux_pointer() {
                report.error(
                    Kind::AuxPointerOverlap,
                    format!("AUX_PTRs cannot overlap: [{}] <=> [{}]", cur, prev),
                );
                continue;
            }

            let exempt = is_exempt_pair(cur.kind(), prev.kind());
            if !cur.vp.kind.same_width(&prev.vp.kind) {
                if !exempt {
                    report.error(
                        Kind::VpTypeMismatch,
                        format!(
                            "VP usage mismatch {} vs {} [{}] <=> [{}]",
                            cur.vp.kind.name(),
                            prev.vp.kind.name(),
                            cur,
                            prev
                        ),
                    );
                }
                continue;
            }

            report.check(cur.vp.addr == prev.vp.addr, Kind::VpAddrMismatch, || {
                format!("VP addr mismatch [{}] <=> [{}]", cur, prev)
            });
            report.check(cur.vp.size == prev.vp.size, Kind::VpSizeMismatch, || {
                format!("VP size mismatch [{}] <=> [{}]", cur, prev)
            });
            if cur.kind() != prev.kind() && !exempt {
                report.error(
                    Kind::ControlTypeMismatch,
                    format!("VP control type mismatch [{}] <=> [{}]", cur, prev),
                );
            }
        }
    }
}

/// Buttons writing the same VP must use distinct keycodes on a page.
pub struct KeycodeCheck;

impl Check for KeycodeCheck {
    fn name(&self) -> &'static str {
        "keycodes"
    }

    fn run(&self, ctx: &ValidationContext<'_>, report: &mut Report) {
        let mut seen: HashMap<(u32, Pic, u16), &TouchControl> = HashMap::new();
        for control in ctx.firmware.touch.iter().filter_map(|r| r.as_control()) {
            let Some(keycode) = control.keycode() else {
                continue;
            };
            match seen.entry((control.vp.addr, control.header.pic, keycode)) {
                Entry::Occupied(first) => report.error(
                    Kind::DuplicateKeycode,
                    format!(
                        "duplicate keycode {:04x} at addr {:04x} [{}] <=> [{}]",
                        keycode,
                        control.vp.addr,
                        control,
                        first.get()
                    ),
                ),
                Entry::Vacant(slot) => {
                    slot.insert(control);
                }
            }
        }
    }
}

/// Text boxes must fit a whole number of lines of their glyphs.
pub struct TextboxCheck;

impl Check for TextboxCheck {
    fn name(&self) -> &'static str {
        "textbox geometry"
    }

    fn run(&self, ctx: &ValidationContext<'_>, report: &mut Report) {
        for record in &ctx.firmware.display {
            let DisplayBody::Text(text) = &record.body else {
                continue;
            };
            let size = record.area.size();
            let (x_px, y_px) = (i64::from(text.x_px), i64::from(text.y_px));

            report.check(x_px * 2 == y_px, Kind::TextboxGlyphSize, || {
                format!("TextBox char x/y sizes wrong [{}]", record)
            });

            let line_height = y_px + i64::from(text.y_tracking_px);
            if line_height == 0 {
                report.error(Kind::TextboxHeight, format!("TextBox has zero line height [{}]", record));
                continue;
            }

            let height = i64::from(size.y);
            let lines = if height < y_px {
                0
            } else {
                1 + (height - y_px) / line_height
            };
            report.check((height - y_px).rem_euclid(line_height) == 0, Kind::TextboxHeight, || {
                format!("box is wrong height [{}]", record)
            });

            let needed = i64::from(text.length) * (x_px + i64::from(text.x_kerning_px));
            let width = i64::from(size.x) * lines;
            if text.monospace {
                report.check(width == needed, Kind::TextboxWidth, || {
                    format!(
                        "monospaced textbox incorrect size ({}px != {}px) [{}]",
                        width, needed, record
                    )
                });
            } else if width < needed {
                report.warning(
                    Kind::TextboxMaybeTooSmall,
                    format!(
                        "non-monospaced textbox possibly too small ({}px < {}px): [{}]",
                        width, needed, record
                    ),
                );
            }
        }
    }
}

pub struct QWordCheck;

impl Check for QWordCheck {
    fn name(&self) -> &'static str {
        "QWORD"
    }

    fn run(&self, ctx: &ValidationContext<'_>, report: &mut Report) {
        for entry in ctx.ram.entries() {
            report.check(entry.vp.kind != VpKind::QWord, Kind::QWordUnsupported, || {
                format!("QWORDs are not supported: [{}]", entry)
            });
        }
    }
}

pub struct PageUsageCheck;

impl Check for PageUsageCheck {
    fn name(&self) -> &'static str {
        "page usage"
    }

    fn run(&self, ctx: &ValidationContext<'_>, report: &mut Report) {
        let pages = &ctx.firmware.pages;
        for record in ctx.firmware.records() {
            report.check(pages.contains_key(&record.pic()), Kind::MissingPage, || {
                format!("bad pic for [{}]", record)
            });
        }
        for record in &ctx.firmware.display {
            for pic in record.pic_refs() {
                report.check(pages.contains_key(&pic), Kind::MissingPage, || {
                    format!("bad pic {} referenced by [{}]", pic, record)
                });
            }
        }
    }
}

/// Icon indices must exist in the library the record names.
pub struct IconUsageCheck;

impl Check for IconUsageCheck {
    fn name(&self) -> &'static str {
        "icon usage"
    }

    fn run(&self, ctx: &ValidationContext<'_>, report: &mut Report) {
        for record in &ctx.firmware.display {
            let Some((lib_id, indices)) = record.icon_refs() else {
                continue;
            };
            let Some(lib) = ctx.firmware.icon_lib(lib_id) else {
                report.error(Kind::MissingIconLib, format!("bad iconlib {} for [{}]", lib_id, record));
                continue;
            };
            for (field, index) in indices {
                report.check(usize::from(index) < lib.len(), Kind::IconIndex, || {
                    format!(
                        "bad icon index {} {} in [{}], {} has {} icons",
                        field,
                        index,
                        record,
                        lib,
                        lib.len()
                    )
                });
            }
        }
    }
}

pub struct EncodingCheck;

impl Check for EncodingCheck {
    fn name(&self) -> &'static str {
        "text encoding"
    }

    fn run(&self, ctx: &ValidationContext<'_>, report: &mut Report) {
        for record in &ctx.firmware.display {
            if let DisplayBody::Text(text) = &record.body {
                if text.encoding != 0 {
                    report.warning(
                        Kind::TextEncoding,
                        format!(
                            "font encoding {} should probably be 0 (8-bit): [{}]",
                            text.encoding, record
                        ),
                    );
                }
            }
        }
    }
}

pub struct FontCheck;

impl Check for FontCheck {
    fn name(&self) -> &'static str {
        "font libraries"
    }

    fn run(&self, ctx: &ValidationContext<'_>, report: &mut Report) {
        for record in ctx.firmware.records() {
            for (field, font) in record.font_refs() {
                if font != 0 {
                    report.warning(
                        Kind::FontLib,
                        format!("{} {} is not the built-in font 0: [{}]", field, font, record),
                    );
                }
            }
        }
    }
}

pub struct AreaCheck;

impl Check for AreaCheck {
    fn name(&self) -> &'static str {
        "areas"
    }

    fn run(&self, ctx: &ValidationContext<'_>, report: &mut Report) {
        for record in ctx.firmware.records() {
            let area = record.area();
            report.check(!area.is_inverted(), Kind::InvertedArea, || {
                format!("area ends before it starts {}..{}: [{}]", area.start, area.end, record)
            });
        }
    }
}

pub(crate) fn run_all(checks: &[Box<dyn Check>], ctx: &ValidationContext<'_>, report: &mut Report) {
    for check in checks {
        let before = report.diagnostics().len();
        check.run(ctx, report);
        debug!(
            "check {}: {} findings",
            check.name(),
            report.diagnostics().len() - before
        );
    }
}

// crates/dgus-core/src/firmware.rs
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use crate::{
    load_display_file, load_icon_library, load_page, load_touch_file, Area, DisplayRecord,
    IconLibrary, Page, Pic, RecordKind, ResourceSet, Result, TouchRecord, VpRegion,
};

/// Every decoded resource of one firmware directory.
#[derive(Debug, Clone, Default)]
pub struct Firmware {
    pub touch: Vec<TouchRecord>,
    pub display: Vec<DisplayRecord>,
    pub pages: BTreeMap<Pic, Page>,
    pub icon_libs: BTreeMap<u32, IconLibrary>,
}

impl Firmware {
    /// Discover and decode everything under `<base>/DWIN_SET`.
    pub fn load(base: &Path) -> Result<Self> {
        let resources = ResourceSet::discover(base)?;
        Self::load_resources(&resources)
    }

    pub fn load_resources(resources: &ResourceSet) -> Result<Self> {
        let mut firmware = Firmware {
            touch: load_touch_file(&resources.touch)?,
            display: load_display_file(&resources.display)?,
            ..Default::default()
        };

        for path in &resources.pages {
            let page = load_page(path)?;
            if let Some(previous) = firmware.pages.insert(page.pic, page) {
                warn!("{}: replaces page {}", path.display(), previous);
            }
        }

        for path in &resources.icon_libs {
            let lib = load_icon_library(path)?;
            if let Some(previous) = firmware.icon_libs.insert(lib.id, lib) {
                warn!("{}: replaces {}", path.display(), previous);
            }
        }

        info!(
            "loaded {} touch records, {} display records, {} pages, {} icon libraries",
            firmware.touch.len(),
            firmware.display.len(),
            firmware.pages.len(),
            firmware.icon_libs.len()
        );
        Ok(firmware)
    }

    /// Display records first, then touch records, each in file order.
    pub fn records(&self) -> impl Iterator<Item = RecordRef<'_>> {
        self.display
            .iter()
            .map(RecordRef::Display)
            .chain(self.touch.iter().map(RecordRef::Touch))
    }

    pub fn icon_lib(&self, id: u8) -> Option<&IconLibrary> {
        self.icon_libs.get(&u32::from(id))
    }
}

/// Borrowed view over either record family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRef<'a> {
    Touch(&'a TouchRecord),
    Display(&'a DisplayRecord),
}

impl<'a> RecordRef<'a> {
    pub fn pic(&self) -> Pic {
        match self {
            RecordRef::Touch(record) => record.pic(),
            RecordRef::Display(record) => record.pic(),
        }
    }

    pub fn area(&self) -> Area {
        match self {
            RecordRef::Touch(record) => record.area(),
            RecordRef::Display(record) => record.area,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            RecordRef::Touch(record) => record.kind(),
            RecordRef::Display(record) => record.kind(),
        }
    }

    pub fn vp(&self) -> VpRegion {
        match self {
            RecordRef::Touch(record) => record.vp(),
            RecordRef::Display(record) => record.vp,
        }
    }

    pub fn font_refs(&self) -> Vec<(&'static str, u8)> {
        match self {
            RecordRef::Touch(record) => record
                .as_control()
                .map(|control| control.font_refs())
                .unwrap_or_default(),
            RecordRef::Display(record) => record.font_refs(),
        }
    }
}

impl fmt::Display for RecordRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordRef::Touch(record) => fmt::Display::fmt(record, f),
            RecordRef::Display(record) => fmt::Display::fmt(record, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::tests::{display_record, icon, numeric, words};
    use crate::iconlib::tests::descriptor;
    use crate::touch::tests::button;
    use crate::{DgusError, RESOURCE_DIR};

    fn write_firmware(dir: &Path, touch: &[u8], display: &[u8]) {
        std::fs::write(dir.join("13TouchFile.bin"), touch).unwrap();
        std::fs::write(dir.join("14ShowFile.bin"), display).unwrap();
    }

    #[test]
    fn test_load_and_iterate_in_encounter_order() {
        let base = tempfile::tempdir().unwrap();
        let dir = base.path().join(RESOURCE_DIR);
        std::fs::create_dir(&dir).unwrap();

        let mut touch = button(0, 0x10, 0, 1);
        touch.extend_from_slice(&[0xff, 0xff]);
        let mut display = icon(0x20, (5, 5), (0, 1), 48);
        display.extend(numeric(0x30, 0));
        write_firmware(&dir, &touch, &display);

        let mut lib = Vec::new();
        lib.extend_from_slice(&descriptor(16, 16, 0x100));
        lib.extend_from_slice(&descriptor(16, 16, 0x200));
        std::fs::write(dir.join("48_icons.ico"), lib).unwrap();

        let firmware = Firmware::load(base.path()).unwrap();
        let kinds: Vec<_> = firmware.records().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec![RecordKind::Icon, RecordKind::Numeric, RecordKind::Button]);
        assert_eq!(firmware.icon_lib(48).map(IconLibrary::len), Some(2));
        assert!(firmware.icon_lib(47).is_none());
        assert!(firmware.pages.is_empty());
    }

    #[test]
    fn test_decode_errors_name_the_file() {
        let base = tempfile::tempdir().unwrap();
        let dir = base.path().join(RESOURCE_DIR);
        std::fs::create_dir(&dir).unwrap();

        let touch = button(0, 0x10, 0, 1);
        let mut bad = display_record(0x20, 0, &words(&[0; 4]));
        bad[0] = 0x11;
        write_firmware(&dir, &touch, &bad);

        let err = Firmware::load(base.path()).unwrap_err();
        match &err {
            DgusError::Resource { path, source } => {
                assert!(path.ends_with("13TouchFile.bin"));
                assert!(matches!(**source, DgusError::MissingEndSentinel { .. }));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(err.to_string().contains("should end in 0xffff"));
    }
}

// crates/dgus-core/src/resources.rs
//! Locates the firmware resources under `<base>/DWIN_SET`.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;

use crate::{DgusError, Result};

pub const RESOURCE_DIR: &str = "DWIN_SET";

pub const TOUCH_PATTERN: &str = "13*.bin";
pub const DISPLAY_PATTERN: &str = "14*.bin";
pub const ICON_LIB_PATTERN: &str = "*.ico";
pub const PAGE_PATTERN: &str = "???_*.bmp";

/// Every resource file one validation run consumes, in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSet {
    pub dir: PathBuf,
    pub touch: PathBuf,
    pub display: PathBuf,
    pub icon_libs: Vec<PathBuf>,
    pub pages: Vec<PathBuf>,
}

fn matcher(pattern: &'static str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| DgusError::Pattern { pattern, source })
}

fn matching(files: &[PathBuf], pattern: &'static str) -> Result<Vec<PathBuf>> {
    let matcher = matcher(pattern)?;
    Ok(files
        .iter()
        .filter(|path| path.file_name().is_some_and(|name| matcher.is_match(name)))
        .cloned()
        .collect())
}

fn first_matching(files: &[PathBuf], pattern: &'static str, dir: &Path) -> Result<PathBuf> {
    matching(files, pattern)?
        .into_iter()
        .next()
        .ok_or_else(|| DgusError::MissingResource {
            pattern,
            dir: dir.to_path_buf(),
        })
}

impl ResourceSet {
    pub fn discover(base: &Path) -> Result<Self> {
        let dir = base.join(RESOURCE_DIR);
        let entries = std::fs::read_dir(&dir).map_err(|e| DgusError::io(&dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DgusError::io(&dir, e))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        let set = ResourceSet {
            touch: first_matching(&files, TOUCH_PATTERN, &dir)?,
            display: first_matching(&files, DISPLAY_PATTERN, &dir)?,
            icon_libs: matching(&files, ICON_LIB_PATTERN)?,
            pages: matching(&files, PAGE_PATTERN)?,
            dir,
        };
        debug!(
            "{}: touch {}, display {}, {} icon libraries, {} pages",
            set.dir.display(),
            set.touch.display(),
            set.display.display(),
            set.icon_libs.len(),
            set.pages.len()
        );
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch_files(dir: &Path, names: &[&str]) {
        for name in names {
            std::fs::write(dir.join(name), b"").unwrap();
        }
    }

    #[test]
    fn test_discover_sorted_resources() {
        let base = tempfile::tempdir().unwrap();
        let dir = base.path().join(RESOURCE_DIR);
        std::fs::create_dir(&dir).unwrap();
        touch_files(
            &dir,
            &[
                "14ShowFile.bin",
                "13TouchFile.bin",
                "48_icons.ico",
                "32_font.ico",
                "001_main.bmp",
                "000_boot.bmp",
                "logo.bmp",
                "22_Config.bin",
            ],
        );

        let set = ResourceSet::discover(base.path()).unwrap();
        assert_eq!(set.touch, dir.join("13TouchFile.bin"));
        assert_eq!(set.display, dir.join("14ShowFile.bin"));
        assert_eq!(set.icon_libs, vec![dir.join("32_font.ico"), dir.join("48_icons.ico")]);
        assert_eq!(set.pages, vec![dir.join("000_boot.bmp"), dir.join("001_main.bmp")]);
    }

    #[test]
    fn test_missing_display_file() {
        let base = tempfile::tempdir().unwrap();
        let dir = base.path().join(RESOURCE_DIR);
        std::fs::create_dir(&dir).unwrap();
        touch_files(&dir, &["13TouchFile.bin"]);

        assert!(matches!(
            ResourceSet::discover(base.path()),
            Err(DgusError::MissingResource { pattern: DISPLAY_PATTERN, .. })
        ));
    }

    #[test]
    fn test_missing_directory() {
        let base = tempfile::tempdir().unwrap();
        assert!(matches!(
            ResourceSet::discover(base.path()),
            Err(DgusError::Io { .. })
        ));
    }
}

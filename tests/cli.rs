// tests/cli.rs
use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use image::{ImageBuffer, Rgb};
use predicates::prelude::*;
use tempfile::TempDir;

fn words(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

/// 32-byte touch button on page 0.
fn button(vp_word: u16, keycode: u16) -> Vec<u8> {
    let mut buf = words(&[0, 10, 10, 60, 40, 0xffff, 0xffff]);
    buf.extend_from_slice(&[0xfe, 0x05, 0x00]);
    buf.extend(words(&[vp_word]));
    buf.push(0x00);
    buf.extend(words(&[keycode]));
    buf.resize(0x20, 0);
    buf
}

/// 32-byte numeric display on page 0.
fn numeric(vp_word: u16, format: u8) -> Vec<u8> {
    let mut buf = vec![0x5a, 0x10, 0xff, 0xff, 0x00, 0x0d];
    buf.extend(words(&[vp_word, 20, 30, 0xffff]));
    buf.extend_from_slice(&[0, 8, 0, 3, 1, format, 0]);
    buf.resize(0x20, 0);
    buf
}

fn write_firmware(touch: &[u8], display: &[u8]) -> TempDir {
    let base = TempDir::new().unwrap();
    let dir = base.path().join("DWIN_SET");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("13TouchFile.bin"), touch).unwrap();
    fs::write(dir.join("14ShowFile.bin"), display).unwrap();
    write_page(&dir, "000_main.bmp");
    base
}

fn write_page(dir: &Path, name: &str) {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(480, 272);
    img.save(dir.join(name)).unwrap();
}

fn with_sentinel(mut data: Vec<u8>) -> Vec<u8> {
    data.extend_from_slice(&[0xff, 0xff]);
    data
}

#[test]
fn test_clean_firmware_passes() {
    let base = write_firmware(&with_sentinel(button(0x20, 1)), &numeric(0x08, 0));

    cargo_bin_cmd!("dgus-validator")
        .arg(base.path())
        .arg("--strict")
        .assert()
        .success()
        .stdout(predicate::str::contains("INFO[summary]: 1 touch records, 1 display records"))
        .stderr(predicate::str::contains("ERROR[").not());
}

#[test]
fn test_errors_exit_zero_unless_strict() {
    // button writes the high byte of the numeric's word
    let mut touch = button(0x08, 1);
    touch[19] = 0x01;
    let base = write_firmware(&with_sentinel(touch), &numeric(0x08, 0));

    cargo_bin_cmd!("dgus-validator")
        .arg(base.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("ERROR[vp-type-mismatch]: VP usage mismatch"));

    cargo_bin_cmd!("dgus-validator")
        .arg(base.path())
        .arg("--strict")
        .assert()
        .failure();
}

#[test]
fn test_missing_end_sentinel_is_fatal() {
    let base = write_firmware(&button(0x20, 1), &numeric(0x08, 0));

    cargo_bin_cmd!("dgus-validator")
        .arg(base.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("should end in 0xffff"))
        .stdout(predicate::str::contains("summary").not());
}

#[test]
fn test_missing_directory() {
    cargo_bin_cmd!("dgus-validator")
        .arg("/nonexistent/dgusm")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Firmware directory not found"));
}

#[test]
fn test_dump_lists_records() {
    let base = write_firmware(&with_sentinel(button(0x20, 1)), &numeric(0x08, 0));

    cargo_bin_cmd!("dgus-dump")
        .arg(base.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ctl:Button    VP 0040 +02"))
        .stdout(predicate::str::contains("Numeric VP 0010 +02 3.1 digits 8x16px"))
        .stdout(predicate::str::contains("P0   'main' (480,272)"));

    cargo_bin_cmd!("dgus-dump")
        .arg(base.path())
        .args(["--only", "touch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Numeric").not());
}

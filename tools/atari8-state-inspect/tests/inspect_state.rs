#![cfg(not(target_arch = "wasm32"))]

use std::fs;
use std::io::Write;

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;

fn push_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

/// A 400/800-line machine with 64 KiB of RAM, every register zeroed and
/// the main RAM filled with 0xaa.
fn state_800_64k() -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"ATARI800");
    buf.extend_from_slice(&[8, 0]); // version, verbose
    buf.extend_from_slice(&[0, 0]); // NTSC, 400/800 line
    push_i32(&mut buf, 0); // no cartridge
    for _ in 0..8 {
        push_i32(&mut buf, 0); // sio status
        push_u16(&mut buf, 0); // no filename
    }
    buf.resize(buf.len() + 14, 0); // antic byte registers
    push_u16(&mut buf, 0); // dlist
    push_u16(&mut buf, 0); // screen address
    push_i32(&mut buf, 0);
    push_i32(&mut buf, 0);
    push_i32(&mut buf, 0);
    buf.resize(buf.len() + 6, 0); // cpu register file
    push_i32(&mut buf, 64); // base ram kb
    buf.resize(buf.len() + 0x10000, 0xaa); // data
    buf.resize(buf.len() + 0x10000, 0); // attrib
    push_i32(&mut buf, 0); // no xe banks
    buf.push(0); // portb
    push_i32(&mut buf, 0); // cart_a0bf_enabled
    push_u16(&mut buf, 0x1234); // pc
    buf.resize(buf.len() + 43, 0); // gtia byte registers
    push_i32(&mut buf, 0); // speaker
    push_i32(&mut buf, 0); // console-value slot
    push_i32(&mut buf, 0); // trig_latch
    buf
}

fn gzipped(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn decodes_a_state_and_dumps_the_ram_image() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("game.state");
    let memory_path = dir.path().join("memory.dat");
    fs::write(&state_path, gzipped(&state_800_64k())).unwrap();

    Command::cargo_bin("atari8-state-inspect")
        .unwrap()
        .arg(&state_path)
        .arg("--memory-out")
        .arg(&memory_path)
        .assert()
        .success()
        .stdout(predicates::str::contains("-> 64 KiB"))
        .stdout(predicates::str::contains("400/800"));

    let ram = fs::read(&memory_path).unwrap();
    assert_eq!(ram.len(), 0x10000);
    assert!(ram.iter().all(|&b| b == 0xaa));
}

#[test]
fn reports_a_truncated_state_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("cut.state");
    let full = state_800_64k();
    fs::write(&state_path, gzipped(&full[..full.len() / 2])).unwrap();

    Command::cargo_bin("atari8-state-inspect")
        .unwrap()
        .arg(&state_path)
        .assert()
        .failure()
        .stderr(predicates::str::contains("truncated input"));
}

#![cfg(not(target_arch = "wasm32"))]

use std::fs;

use assert_cmd::Command;

#[test]
fn writes_all_four_tables() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("atari8-poly-gen")
        .unwrap()
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success();

    for (n, len) in [(4usize, 15usize), (5, 31), (9, 511), (17, 131071)] {
        let table = fs::read(dir.path().join(format!("poly_{n}.dat"))).unwrap();
        assert_eq!(table.len(), len, "poly_{n}.dat");
        assert!(table.iter().all(|&b| b <= 1), "poly_{n}.dat holds raw bits");
    }

    let poly4 = fs::read(dir.path().join("poly_4.dat")).unwrap();
    assert_eq!(poly4, [0, 0, 0, 1, 0, 0, 1, 1, 0, 1, 0, 1, 1, 1, 1]);
}

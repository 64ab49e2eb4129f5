//! Tests for the extract command.

use cli::extract;
use cli::CliError;
use ethers::signers::{LocalWallet, Signer};
use keystore::KeystoreError;
use std::str::FromStr;
use tempfile::tempdir;

const PASSWORD: &str = "benchmark";

/// Tests that the printed key belongs to the keystore account.
#[test]
fn test_extract_prints_matching_key() {
    let dir = tempdir().unwrap();
    let mut rng = rand::thread_rng();
    let (wallet, name) = LocalWallet::new_keystore(dir.path(), &mut rng, PASSWORD, None).unwrap();

    let mut out = Vec::new();
    let extracted = extract::run(dir.path().join(name), PASSWORD, &mut out).unwrap();

    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].len(), 64);
    assert!(lines[0].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    let restored = LocalWallet::from_str(lines[0]).unwrap();
    assert_eq!(restored.address(), wallet.address());
    assert_eq!(extracted.address(), wallet.address());
}

/// Tests that a wrong password prints nothing.
#[test]
fn test_extract_wrong_password_prints_nothing() {
    let dir = tempdir().unwrap();
    let mut rng = rand::thread_rng();
    let (_wallet, name) = LocalWallet::new_keystore(dir.path(), &mut rng, PASSWORD, None).unwrap();

    let mut out = Vec::new();
    match extract::run(dir.path().join(name), "not the password", &mut out) {
        Err(CliError::KeystoreError(KeystoreError::DecryptionError(_))) => {}
        other => panic!("expected decryption error, got {:?}", other),
    }
    assert!(out.is_empty());
}

/// Tests that a missing keystore prints nothing.
#[test]
fn test_extract_missing_file_prints_nothing() {
    let dir = tempdir().unwrap();

    let mut out = Vec::new();
    match extract::run(dir.path().join("UTC--missing"), PASSWORD, &mut out) {
        Err(CliError::KeystoreError(KeystoreError::FileError(_))) => {}
        other => panic!("expected file error, got {:?}", other),
    }
    assert!(out.is_empty());
}

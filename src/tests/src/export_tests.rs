//! Tests for the export command.

use cli::export;
use cli::CliError;
use protocol::msgpack;
use protocol::Account;
use rusqlite::{params, Connection};
use std::path::Path;
use tempfile::tempdir;

/// Writes a root key file for the account with `seed`.
fn write_root_key(net_root: &Path, index: u64, seed: [u8; 32]) -> Account {
    let account = Account::from_seed(&seed);
    let public_key = account.address().0;

    let mut secret_key = seed.to_vec();
    secret_key.extend_from_slice(&public_key);

    let mut record = Vec::new();
    msgpack::write_map_len(&mut record, 2).unwrap();
    msgpack::write_str(&mut record, "SignatureVerifier").unwrap();
    msgpack::write_bin(&mut record, &public_key).unwrap();
    msgpack::write_str(&mut record, "SK").unwrap();
    msgpack::write_bin(&mut record, &secret_key).unwrap();

    let conn = Connection::open(export::root_key_path(net_root, index)).unwrap();
    conn.execute("CREATE TABLE RootAccount (data blob)", []).unwrap();
    conn.execute("INSERT INTO RootAccount (data) VALUES (?1)", params![record])
        .unwrap();

    account
}

/// Tests that every wallet is written as an address and mnemonic entry.
#[test]
fn test_export_writes_every_wallet() {
    let dir = tempdir().unwrap();
    let first = write_root_key(dir.path(), 0, [1u8; 32]);
    let second = write_root_key(dir.path(), 1, [2u8; 32]);

    let mut out = Vec::new();
    let exported = export::run(dir.path(), 2, &mut out).unwrap();

    assert_eq!(exported.len(), 2);
    assert_eq!(exported[0].index, 0);
    assert_eq!(exported[1].address, second.address());

    let expected = format!(
        "- address:  {}\n  mnemonic: {}\n- address:  {}\n  mnemonic: {}\n",
        first.address(),
        first.mnemonic(),
        second.address(),
        second.mnemonic()
    );
    assert_eq!(String::from_utf8(out).unwrap(), expected);

    // The mnemonics restore the same accounts
    for wallet in &exported {
        let restored = Account::from_mnemonic(&wallet.mnemonic).unwrap();
        assert_eq!(restored.address(), wallet.address);
    }
}

/// Tests that a missing wallet fails the export but keeps the others.
#[test]
fn test_export_missing_wallet_is_reported() {
    let dir = tempdir().unwrap();
    write_root_key(dir.path(), 0, [1u8; 32]);
    write_root_key(dir.path(), 2, [3u8; 32]);

    let mut out = Vec::new();
    match export::run(dir.path(), 3, &mut out) {
        Err(CliError::ExportIncomplete { failed: 1, total: 3 }) => {}
        other => panic!("expected incomplete export, got {:?}", other),
    }

    let output = String::from_utf8(out).unwrap();
    assert_eq!(output.matches("- address:  ").count(), 2);
    assert!(output.contains(&Account::from_seed(&[3u8; 32]).address().to_string()));
}

/// Tests that a store without a root account is rejected.
#[test]
fn test_export_empty_store_is_rejected() {
    let dir = tempdir().unwrap();
    let conn = Connection::open(export::root_key_path(dir.path(), 0)).unwrap();
    conn.execute("CREATE TABLE RootAccount (data blob)", []).unwrap();
    drop(conn);

    match export::read_root_account(&export::root_key_path(dir.path(), 0)) {
        Err(CliError::StoreError(_)) => {}
        other => panic!("expected store error, got {:?}", other),
    }
}

/// Tests that exporting no wallets writes nothing.
#[test]
fn test_export_zero_wallets() {
    let dir = tempdir().unwrap();

    let mut out = Vec::new();
    let exported = export::run(dir.path(), 0, &mut out).unwrap();
    assert!(exported.is_empty());
    assert!(out.is_empty());
}

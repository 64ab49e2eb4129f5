//! Extract command: print the raw private key of a keystore.

use crate::errors::CliError;
use keystore::{decrypt_keystore, ExtractedKey};
use std::io::Write;
use std::path::Path;

/// Runs the extract command.
///
/// Writes the private key as a single hex line to `out`. Nothing is written
/// if decryption fails.
pub fn run<P: AsRef<Path>, W: Write>(
    keystore_path: P,
    password: &str,
    out: &mut W,
) -> Result<ExtractedKey, CliError> {
    let extracted = decrypt_keystore(keystore_path, password)?;
    writeln!(out, "{}", extracted.private_key_hex())?;
    Ok(extracted)
}

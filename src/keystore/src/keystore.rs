//! Keystore decryption.

use crate::errors::KeystoreError;
use ethers::core::types::Address as EthAddress;
use ethers::signers::{LocalWallet, Signer};
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

/// A private key recovered from a keystore.
pub struct ExtractedKey {
    /// Raw secp256k1 private key
    private_key: Vec<u8>,
    /// Address derived from the private key
    address: EthAddress,
    /// Address written in the keystore file, if any
    declared_address: Option<EthAddress>,
}

impl ExtractedKey {
    /// Gets the raw private key.
    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    /// Gets the private key as lowercase hex without a `0x` prefix.
    pub fn private_key_hex(&self) -> String {
        hex::encode(&self.private_key)
    }

    /// Gets the address derived from the private key.
    pub fn address(&self) -> EthAddress {
        self.address
    }

    /// Gets the address declared in the keystore file.
    pub fn declared_address(&self) -> Option<EthAddress> {
        self.declared_address
    }

    /// Returns false only when the file declares a different address.
    pub fn address_matches(&self) -> bool {
        self.declared_address.map_or(true, |declared| declared == self.address)
    }
}

impl fmt::Debug for ExtractedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractedKey")
            .field("private_key", &"[REDACTED]")
            .field("address", &self.address)
            .field("declared_address", &self.declared_address)
            .finish()
    }
}

/// Decrypts the keystore at `path` with `password`.
///
/// A wrong password surfaces as [`KeystoreError::DecryptionError`] and no
/// key material is returned.
pub fn decrypt_keystore<P: AsRef<Path>>(path: P, password: &str) -> Result<ExtractedKey, KeystoreError> {
    let path = path.as_ref();

    let contents = std::fs::read_to_string(path)?;
    let document: serde_json::Value = serde_json::from_str(&contents)?;
    let declared_address = match document.get("address").and_then(|v| v.as_str()) {
        Some(text) => match parse_address(text) {
            Ok(address) => Some(address),
            Err(e) => {
                warn!("Ignoring address of keystore {}: {}", path.display(), e);
                None
            }
        },
        None => None,
    };

    let wallet = LocalWallet::decrypt_keystore(path, password)?;
    let extracted = ExtractedKey {
        private_key: wallet.signer().to_bytes().to_vec(),
        address: wallet.address(),
        declared_address,
    };

    if !extracted.address_matches() {
        warn!(
            "Keystore {} declares address {:?} but the key belongs to {:?}",
            path.display(),
            declared_address,
            extracted.address
        );
    }
    info!("Decrypted keystore {} for {:?}", path.display(), extracted.address);

    Ok(extracted)
}

fn parse_address(text: &str) -> Result<EthAddress, KeystoreError> {
    text.trim_start_matches("0x")
        .parse::<EthAddress>()
        .map_err(|e| KeystoreError::InvalidAddress(format!("{}: {}", text, e)))
}

//! Algorand account addresses.

use crate::errors::ProtocolError;
use crate::types::{sha512_256, KEY_LEN};
use data_encoding::BASE32_NOPAD;
use std::fmt;
use std::str::FromStr;

/// Number of trailing digest bytes appended to the public key.
const CHECKSUM_LEN: usize = 4;

/// Length of the base32 text form of an address.
pub const ADDRESS_STR_LEN: usize = 58;

/// An account address: the raw ed25519 public key of the account.
///
/// The text form is the unpadded base32 encoding of the public key followed
/// by the last four bytes of its SHA-512/256 digest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; KEY_LEN]);

impl Address {
    /// Creates an address from a public key.
    pub fn from_public_key(public_key: [u8; KEY_LEN]) -> Self {
        Self(public_key)
    }

    /// Returns the public key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Returns true for the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; KEY_LEN]
    }

    fn checksum(&self) -> [u8; CHECKSUM_LEN] {
        let digest = sha512_256(&self.0);
        let mut checksum = [0u8; CHECKSUM_LEN];
        checksum.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
        checksum
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = [0u8; KEY_LEN + CHECKSUM_LEN];
        bytes[..KEY_LEN].copy_from_slice(&self.0);
        bytes[KEY_LEN..].copy_from_slice(&self.checksum());
        f.write_str(&BASE32_NOPAD.encode(&bytes))
    }
}

impl FromStr for Address {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ADDRESS_STR_LEN {
            return Err(ProtocolError::InvalidAddress(format!(
                "{} has length {} (expected {})",
                s,
                s.len(),
                ADDRESS_STR_LEN
            )));
        }

        let decoded = BASE32_NOPAD
            .decode(s.as_bytes())
            .map_err(|e| ProtocolError::InvalidAddress(format!("{}: {}", s, e)))?;

        if decoded.len() != KEY_LEN + CHECKSUM_LEN {
            return Err(ProtocolError::InvalidAddress(format!(
                "{} decodes to {} bytes (expected {})",
                s,
                decoded.len(),
                KEY_LEN + CHECKSUM_LEN
            )));
        }

        let mut public_key = [0u8; KEY_LEN];
        public_key.copy_from_slice(&decoded[..KEY_LEN]);
        let address = Address(public_key);

        if address.checksum()[..] != decoded[KEY_LEN..] {
            return Err(ProtocolError::AddressChecksum(s.to_string()));
        }

        Ok(address)
    }
}

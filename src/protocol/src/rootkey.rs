//! Root account secrets as stored in algod wallet root key files.
//!
//! A root key file holds a single msgpack-encoded record with the account's
//! public key (`SignatureVerifier`) and its 64-byte ed25519 secret key (`SK`),
//! the seed followed by the public key. The record is written either as a
//! map keyed by field name or as a two-element array.

use crate::account::Account;
use crate::errors::ProtocolError;
use crate::msgpack::Reader;
use crate::types::KEY_LEN;

/// Length of an ed25519 secret key: seed and public key.
pub const SECRET_KEY_LEN: usize = 2 * KEY_LEN;

/// Signing secrets of a root account.
pub struct RootSecrets {
    public_key: [u8; KEY_LEN],
    secret_key: [u8; SECRET_KEY_LEN],
}

impl RootSecrets {
    /// Decodes the msgpack record of a root key file.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = Reader::new(bytes);
        let mut public_key = None;
        let mut secret_key = None;

        let mut as_map = reader.clone();
        if let Ok(len) = as_map.read_map_len() {
            reader = as_map;
            for _ in 0..len {
                match reader.read_str()? {
                    "SignatureVerifier" => public_key = Some(reader.read_fixed_bin::<KEY_LEN>()?),
                    "SK" => secret_key = Some(reader.read_fixed_bin::<SECRET_KEY_LEN>()?),
                    other => return Err(ProtocolError::Decoding(format!("unknown root key field {:?}", other))),
                }
            }
        } else {
            let len = reader.read_array_len()?;
            if len > 2 {
                return Err(ProtocolError::Decoding(format!("too many root key fields: {}", len)));
            }
            if len > 0 {
                public_key = Some(reader.read_fixed_bin::<KEY_LEN>()?);
            }
            if len > 1 {
                secret_key = Some(reader.read_fixed_bin::<SECRET_KEY_LEN>()?);
            }
        }

        if !reader.is_empty() {
            return Err(ProtocolError::Decoding(format!(
                "{} trailing bytes after root key",
                reader.remaining().len()
            )));
        }

        match (public_key, secret_key) {
            (Some(public_key), Some(secret_key)) => Ok(Self { public_key, secret_key }),
            (None, _) => Err(ProtocolError::Decoding("root key without SignatureVerifier".to_string())),
            (_, None) => Err(ProtocolError::Decoding("root key without SK".to_string())),
        }
    }

    /// Gets the ed25519 seed, the first half of the secret key.
    pub fn seed(&self) -> [u8; KEY_LEN] {
        let mut seed = [0u8; KEY_LEN];
        seed.copy_from_slice(&self.secret_key[..KEY_LEN]);
        seed
    }

    /// Recovers the signing account.
    ///
    /// Fails if the seed does not derive the stored public key.
    pub fn account(&self) -> Result<Account, ProtocolError> {
        let account = Account::from_seed(&self.seed());
        if account.address().0 != self.public_key {
            return Err(ProtocolError::Decoding(
                "root key seed does not match its public key".to_string(),
            ));
        }
        Ok(account)
    }
}

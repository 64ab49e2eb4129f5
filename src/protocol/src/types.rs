//! Shared primitive types for the Algorand protocol.

use sha2::{Digest, Sha512_256};

/// Amount in microAlgos, the smallest currency unit.
pub type MicroAlgos = u64;

/// A consensus round number.
pub type Round = u64;

/// Minimum transaction fee enforced by the network.
pub const MIN_TXN_FEE: MicroAlgos = 1000;

/// Number of bytes in an ed25519 public key or seed.
pub const KEY_LEN: usize = 32;

/// Number of bytes in an ed25519 signature.
pub const SIGNATURE_LEN: usize = 64;

/// Computes the SHA-512/256 digest used for addresses and transaction ids.
pub fn sha512_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha512_256::new();
    hasher.update(data);
    let result = hasher.finalize();

    let mut digest = [0u8; 32];
    digest.copy_from_slice(&result);
    digest
}

//! Decryption of Ethereum secret-storage (geth-style) keystore files.

pub mod errors;
pub mod keystore;

pub use errors::KeystoreError;
pub use keystore::{decrypt_keystore, ExtractedKey};

//! Error types for the protocol crate.

use thiserror::Error;

/// Errors that can occur while handling Algorand primitives.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Error when an address string cannot be decoded.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Error when an address decodes but its checksum does not match.
    #[error("Address checksum mismatch for {0}")]
    AddressChecksum(String),

    /// Error when a mnemonic has the wrong number of words.
    #[error("Invalid mnemonic: expected {expected} words, got {actual}")]
    MnemonicLength {
        /// The expected word count
        expected: usize,
        /// The actual word count
        actual: usize,
    },

    /// Error when a mnemonic contains a word outside the word list.
    #[error("Invalid mnemonic: unknown word {0:?}")]
    UnknownWord(String),

    /// Error when a mnemonic checksum word does not match the key.
    #[error("Invalid mnemonic: checksum mismatch")]
    MnemonicChecksum,

    /// Error when a mnemonic does not decode to a 32-byte key.
    #[error("Invalid mnemonic: does not encode a 32-byte key")]
    MnemonicKeyLength,

    /// Error when an ed25519 key or signature is rejected.
    #[error("Signature error: {0}")]
    Signature(#[from] ed25519_dalek::SignatureError),

    /// Error when msgpack encoding fails.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error when msgpack decoding fails.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Error when a transaction field has an unexpected value.
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
}

/// Error types for the keystore crate.
use std::error::Error as StdError;
use std::fmt;

/// Errors that can occur while decrypting a keystore.
#[derive(Debug)]
pub enum KeystoreError {
    /// Error when the keystore file cannot be read.
    FileError(std::io::Error),

    /// Error when the keystore file is not valid JSON.
    JsonError(serde_json::Error),

    /// Error when decryption fails, including a wrong password.
    DecryptionError(String),

    /// Error when an address field is malformed.
    InvalidAddress(String),
}

impl fmt::Display for KeystoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeystoreError::FileError(e) => write!(f, "File error: {}", e),
            KeystoreError::JsonError(e) => write!(f, "JSON error: {}", e),
            KeystoreError::DecryptionError(msg) => write!(f, "Decryption error: {}", msg),
            KeystoreError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
        }
    }
}

impl StdError for KeystoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            KeystoreError::FileError(e) => Some(e),
            KeystoreError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for KeystoreError {
    fn from(error: std::io::Error) -> Self {
        KeystoreError::FileError(error)
    }
}

impl From<serde_json::Error> for KeystoreError {
    fn from(error: serde_json::Error) -> Self {
        KeystoreError::JsonError(error)
    }
}

impl From<ethers::signers::WalletError> for KeystoreError {
    fn from(error: ethers::signers::WalletError) -> Self {
        KeystoreError::DecryptionError(error.to_string())
    }
}

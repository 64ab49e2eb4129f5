//! Error types for the command line tools.

use std::error::Error as StdError;
use std::fmt;

/// Errors that can occur while running a command.
#[derive(Debug)]
pub enum CliError {
    /// Error when writing the command output fails.
    OutputError(std::io::Error),

    /// Error when a mnemonic, address or transaction is invalid.
    ProtocolError(protocol::ProtocolError),

    /// Error when a node request fails.
    NodeError(algod::AlgodError),

    /// Error when a keystore cannot be decrypted.
    KeystoreError(keystore::KeystoreError),

    /// Error when a wallet root key file cannot be read.
    StoreError(rusqlite::Error),

    /// Error when some wallets could not be exported.
    ExportIncomplete {
        /// Number of wallets that failed
        failed: u64,
        /// Number of wallets requested
        total: u64,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::OutputError(e) => write!(f, "Output error: {}", e),
            CliError::ProtocolError(e) => write!(f, "{}", e),
            CliError::NodeError(e) => write!(f, "{}", e),
            CliError::KeystoreError(e) => write!(f, "{}", e),
            CliError::StoreError(e) => write!(f, "Wallet store error: {}", e),
            CliError::ExportIncomplete { failed, total } => {
                write!(f, "Failed to export {} of {} wallets", failed, total)
            }
        }
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CliError::OutputError(e) => Some(e),
            CliError::ProtocolError(e) => e.source(),
            CliError::NodeError(e) => e.source(),
            CliError::KeystoreError(e) => e.source(),
            CliError::StoreError(e) => Some(e),
            CliError::ExportIncomplete { .. } => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::OutputError(error)
    }
}

impl From<protocol::ProtocolError> for CliError {
    fn from(error: protocol::ProtocolError) -> Self {
        CliError::ProtocolError(error)
    }
}

impl From<algod::AlgodError> for CliError {
    fn from(error: algod::AlgodError) -> Self {
        CliError::NodeError(error)
    }
}

impl From<keystore::KeystoreError> for CliError {
    fn from(error: keystore::KeystoreError) -> Self {
        CliError::KeystoreError(error)
    }
}

impl From<rusqlite::Error> for CliError {
    fn from(error: rusqlite::Error) -> Self {
        CliError::StoreError(error)
    }
}

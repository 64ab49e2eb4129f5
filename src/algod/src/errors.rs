//! Error types for the algod client.

use protocol::ProtocolError;
use thiserror::Error;

/// Errors that can occur while talking to an algod node.
#[derive(Error, Debug)]
pub enum AlgodError {
    /// Error when the node address is not a valid URL.
    #[error("Invalid node address {0}")]
    InvalidUrl(String),

    /// Error when the request could not be delivered.
    #[error("Failed to reach node: {0}")]
    Transport(#[from] reqwest::Error),

    /// Error when the node answers with a non-success status.
    #[error("Node returned HTTP {status}: {message}")]
    Http {
        /// The HTTP status code
        status: u16,
        /// The message reported by the node
        message: String,
    },

    /// Error when a response body cannot be understood.
    #[error("Invalid response from node: {0}")]
    InvalidResponse(String),

    /// Error when the node drops a transaction from its pool.
    #[error("Transaction {txid} rejected: {reason}")]
    TransactionRejected {
        /// The transaction id
        txid: String,
        /// The pool error reported by the node
        reason: String,
    },

    /// Error when a transaction is not confirmed in time.
    #[error("Transaction {txid} not confirmed after {rounds} rounds")]
    ConfirmationTimeout {
        /// The transaction id
        txid: String,
        /// The number of rounds waited
        rounds: u64,
    },

    /// Error when encoding a transaction fails.
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl AlgodError {
    /// Returns true if the node reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AlgodError::Http { status: 404, .. })
    }
}

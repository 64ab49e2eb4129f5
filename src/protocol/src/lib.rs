//! Algorand primitives for the payment sender.
//!
//! This crate covers the small slice of the Algorand protocol a payment
//! client needs: base32 addresses with checksums, the 25-word mnemonic
//! encoding of ed25519 seeds, canonical msgpack encoding of signed payment
//! transactions, and the root key records of algod wallets.

pub mod account;
pub mod address;
pub mod errors;
pub mod mnemonic;
pub mod msgpack;
pub mod rootkey;
pub mod transaction;
pub mod types;

// Re-export commonly used types
pub use account::Account;
pub use address::Address;
pub use errors::ProtocolError;
pub use rootkey::RootSecrets;
pub use transaction::{SignedTransaction, SuggestedParams, Transaction};
pub use types::{MicroAlgos, Round};

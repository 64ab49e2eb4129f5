//! Client for the Algorand node (algod) v2 REST API.
//!
//! Only the endpoints a payment needs are covered: node status, account
//! information, suggested parameters, transaction submission and pending
//! transaction lookups.

pub mod client;
pub mod config;
pub mod confirmation;
pub mod errors;
pub mod models;

// Re-export commonly used types
pub use client::AlgodClient;
pub use config::AlgodConfig;
pub use confirmation::wait_for_confirmation;
pub use errors::AlgodError;
pub use models::{AccountInformation, NodeStatus, PendingTransaction, TransactionParams};

//! Response bodies of the algod v2 REST API.

use crate::errors::AlgodError;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use protocol::{MicroAlgos, Round, SuggestedParams};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Node status, as returned by `/v2/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NodeStatus {
    /// The last round seen by the node
    pub last_round: Round,
    /// Consensus version of the last round
    #[serde(default)]
    pub last_version: String,
    /// Nanoseconds since the last round
    #[serde(default)]
    pub time_since_last_round: u64,
}

/// Account information, as returned by `/v2/accounts/{address}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AccountInformation {
    /// The account address
    pub address: String,
    /// Total balance in microAlgos, pending rewards included
    pub amount: MicroAlgos,
    /// Balance without pending rewards
    #[serde(default)]
    pub amount_without_pending_rewards: MicroAlgos,
    /// Participation status
    #[serde(default)]
    pub status: String,
}

/// Transaction parameters, as returned by `/v2/transactions/params`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransactionParams {
    /// Consensus protocol version
    pub consensus_version: String,
    /// Fee per byte
    pub fee: MicroAlgos,
    /// Base64 encoded genesis hash
    pub genesis_hash: String,
    /// Genesis id
    pub genesis_id: String,
    /// The last round seen by the node
    pub last_round: Round,
    /// Minimum transaction fee
    #[serde(default)]
    pub min_fee: MicroAlgos,
}

impl TransactionParams {
    /// Converts node parameters into transaction parameters valid for the
    /// next `validity_rounds` rounds.
    ///
    /// The last valid round is capped at the largest round number.
    pub fn to_suggested_params(&self, validity_rounds: u64) -> Result<SuggestedParams, AlgodError> {
        let decoded = BASE64_STANDARD
            .decode(&self.genesis_hash)
            .map_err(|e| AlgodError::InvalidResponse(format!("Invalid genesis hash: {}", e)))?;

        if decoded.len() != 32 {
            return Err(AlgodError::InvalidResponse(format!(
                "Invalid genesis hash length: {} (expected 32)",
                decoded.len()
            )));
        }

        let mut genesis_hash = [0u8; 32];
        genesis_hash.copy_from_slice(&decoded);

        Ok(SuggestedParams {
            fee: self.fee,
            min_fee: self.min_fee,
            first_valid: self.last_round,
            last_valid: self.last_round.saturating_add(validity_rounds),
            genesis_id: self.genesis_id.clone(),
            genesis_hash,
            flat_fee: false,
        })
    }
}

/// Response to a transaction submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostTransactionsResponse {
    /// The id of the submitted transaction
    #[serde(rename = "txId")]
    pub tx_id: String,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// The error message
    pub message: String,
}

/// A transaction as seen by the node's pool or ledger.
///
/// The full record is kept so it can be reported as returned.
#[derive(Debug, Clone)]
pub struct PendingTransaction {
    /// Round the transaction was confirmed in, if any
    pub confirmed_round: Option<Round>,
    /// Reason the transaction was dropped from the pool; empty if none
    pub pool_error: String,
    /// The record as returned by the node
    pub record: serde_json::Value,
}

impl PendingTransaction {
    /// Builds a pending transaction from the JSON record returned by the node.
    pub fn from_record(record: serde_json::Value) -> Result<Self, AlgodError> {
        if !record.is_object() {
            return Err(AlgodError::InvalidResponse(format!(
                "Expected pending transaction object, got {}",
                record
            )));
        }

        let confirmed_round = record.get("confirmed-round").and_then(|v| v.as_u64());
        let pool_error = record
            .get("pool-error")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            confirmed_round,
            pool_error,
            record,
        })
    }

    /// Returns true once the transaction is in a round.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_round.unwrap_or(0) > 0
    }
}

impl fmt::Display for PendingTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.record)
    }
}

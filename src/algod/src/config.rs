//! Configuration for the algod client.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default algod endpoint of a local private network.
pub const DEFAULT_ADDRESS: &str = "http://localhost:8022";

/// Number of rounds to wait for a confirmation before giving up.
pub const DEFAULT_WAIT_ROUNDS: u64 = 10;

/// Number of rounds a transaction stays valid after its first round.
pub const DEFAULT_VALIDITY_ROUNDS: u64 = 1000;

/// Configuration for the algod client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgodConfig {
    /// The node to connect to
    pub address: String,
    /// The API token of the node
    pub token: String,
    /// Rounds to wait for a transaction confirmation
    pub wait_rounds: u64,
    /// Rounds a new transaction stays valid
    pub validity_rounds: u64,
}

impl Default for AlgodConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            token: "a".repeat(64),
            wait_rounds: DEFAULT_WAIT_ROUNDS,
            validity_rounds: DEFAULT_VALIDITY_ROUNDS,
        }
    }
}

impl AlgodConfig {
    /// Reads a JSON configuration file.
    ///
    /// Fields missing from the file keep their default values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

//! Command line options of the transfer tool.

use crate::transfer::TransferRequest;
use algod::AlgodConfig;
use anyhow::Result;
use std::path::PathBuf;
use structopt::StructOpt;

/// Command line arguments for the transfer tool.
#[derive(Debug, StructOpt)]
#[structopt(name = "algo-send", about = "Send Algos from one account to another")]
pub struct SendOptions {
    /// Algod address [default: http://localhost:8022]
    #[structopt(short = "d", long = "algod_address")]
    pub algod_address: Option<String>,

    /// Algod token [default: 64 times 'a']
    #[structopt(short = "t", long = "algod_token")]
    pub algod_token: Option<String>,

    /// Private mnemonic of the sender account
    #[structopt(short = "p", long = "sender_mnemonic")]
    pub sender_mnemonic: String,

    /// Receiver account address
    #[structopt(short = "r", long = "receiver")]
    pub receiver: String,

    /// Amount of microAlgos to send
    #[structopt(short = "a", long = "amount", default_value = "1000000")]
    pub amount: u64,

    /// Path to a JSON client configuration file
    #[structopt(short = "c", long = "config", parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Rounds to wait for the confirmation, 0 for no limit [default: 10]
    #[structopt(short = "w", long = "wait_rounds")]
    pub wait_rounds: Option<u64>,
}

/// Everything the transfer tool needs once the options are resolved.
#[derive(Debug, Clone)]
pub struct SendSettings {
    /// Node connection and timing settings
    pub node: AlgodConfig,
    /// The transfer to perform
    pub request: TransferRequest,
}

impl SendOptions {
    /// Resolves the options into settings.
    ///
    /// A flag wins over the configuration file, which wins over the built-in
    /// defaults.
    pub fn resolve(self) -> Result<SendSettings> {
        let mut node = match &self.config {
            Some(path) => AlgodConfig::from_file(path)?,
            None => AlgodConfig::default(),
        };

        if let Some(address) = self.algod_address {
            node.address = address;
        }
        if let Some(token) = self.algod_token {
            node.token = token;
        }
        if let Some(wait_rounds) = self.wait_rounds {
            node.wait_rounds = wait_rounds;
        }

        let request = TransferRequest {
            sender_mnemonic: self.sender_mnemonic,
            receiver: self.receiver,
            amount: self.amount,
            wait_rounds: node.wait_rounds,
            validity_rounds: node.validity_rounds,
        };

        Ok(SendSettings { node, request })
    }
}

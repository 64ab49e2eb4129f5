//! HTTP client for the algod v2 REST API.

use crate::errors::AlgodError;
use crate::models::{
    AccountInformation, ErrorResponse, NodeStatus, PendingTransaction, PostTransactionsResponse,
    TransactionParams,
};
use protocol::{Address, Round, SignedTransaction};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Header carrying the node API token.
const TOKEN_HEADER: &str = "X-Algo-API-Token";

/// How long to wait for the TCP connection to the node.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a single algod node.
#[derive(Debug, Clone)]
pub struct AlgodClient {
    /// Base URL of the node, without a trailing slash
    base_url: String,
    /// API token sent with every request
    token: String,
    /// The underlying HTTP client
    http: reqwest::Client,
}

impl AlgodClient {
    /// Creates a client for the node at `address` using `token`.
    pub fn new(address: &str, token: &str) -> Result<Self, AlgodError> {
        let url = Url::parse(address).map_err(|e| AlgodError::InvalidUrl(format!("{}: {}", address, e)))?;
        if url.cannot_be_a_base() {
            return Err(AlgodError::InvalidUrl(address.to_string()));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: address.trim_end_matches('/').to_string(),
            token: token.to_string(),
            http,
        })
    }

    /// Returns the base URL of the node.
    pub fn address(&self) -> &str {
        &self.base_url
    }

    /// Gets the current node status.
    pub async fn status(&self) -> Result<NodeStatus, AlgodError> {
        self.get("/v2/status").await
    }

    /// Waits until the node has seen a round after `round`, then returns the status.
    pub async fn status_after_block(&self, round: Round) -> Result<NodeStatus, AlgodError> {
        self.get(&format!("/v2/status/wait-for-block-after/{}", round)).await
    }

    /// Gets the information of an account.
    pub async fn account_information(&self, address: &Address) -> Result<AccountInformation, AlgodError> {
        self.get(&format!("/v2/accounts/{}", address)).await
    }

    /// Gets the parameters for building a transaction.
    pub async fn suggested_params(&self) -> Result<TransactionParams, AlgodError> {
        self.get("/v2/transactions/params").await
    }

    /// Submits a signed transaction and returns its id.
    pub async fn send_transaction(&self, transaction: &SignedTransaction) -> Result<String, AlgodError> {
        let body = transaction.encode()?;
        let url = format!("{}/v2/transactions", self.base_url);
        debug!("POST {} ({} bytes)", url, body.len());

        let response = self
            .http
            .post(&url)
            .header(TOKEN_HEADER, &self.token)
            .header(CONTENT_TYPE, "application/x-binary")
            .body(body)
            .send()
            .await?;

        let posted: PostTransactionsResponse = Self::parse(response).await?;
        info!("Submitted transaction {}", posted.tx_id);
        Ok(posted.tx_id)
    }

    /// Gets a transaction from the pool or, once confirmed, the ledger.
    pub async fn pending_transaction_information(&self, txid: &str) -> Result<PendingTransaction, AlgodError> {
        let record: serde_json::Value = self.get(&format!("/v2/transactions/pending/{}", txid)).await?;
        PendingTransaction::from_record(record)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AlgodError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, AlgodError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorResponse>(&text) {
                Ok(body) => body.message,
                Err(_) => text,
            };
            return Err(AlgodError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| AlgodError::InvalidResponse(format!("{}: {}", e, text)))
    }
}

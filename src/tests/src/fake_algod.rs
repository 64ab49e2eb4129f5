//! In-process algod node used by the integration tests.
//!
//! The node keeps balances in memory, decodes and verifies submitted
//! transactions, and confirms them after a configurable number of rounds.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use protocol::{Address, MicroAlgos, Round, SignedTransaction};
use serde_json::json;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

/// Genesis id reported by the fake node.
pub const GENESIS_ID: &str = "fakenet-v1";

/// Genesis hash reported by the fake node.
pub const GENESIS_HASH: [u8; 32] = [9u8; 32];

/// A submitted transaction and its fate.
#[derive(Debug, Clone)]
pub struct PendingEntry {
    /// The transaction as submitted
    pub signed: SignedTransaction,
    /// Round the transaction will be confirmed in; never if `None`
    pub confirm_at: Option<Round>,
    /// Round the transaction was confirmed in
    pub confirmed_round: Option<Round>,
    /// Pool error reported for the transaction
    pub pool_error: String,
}

/// State of the fake node.
#[derive(Debug, Clone)]
pub struct LedgerState {
    /// API token the node accepts
    pub token: String,
    /// Last round the node has seen
    pub last_round: Round,
    /// Balances by account
    pub balances: HashMap<Address, MicroAlgos>,
    /// Fee per byte reported in the suggested params
    pub fee_per_byte: MicroAlgos,
    /// Minimum fee reported in the suggested params
    pub min_fee: MicroAlgos,
    /// Rounds between submission and confirmation; never confirms if `None`
    pub confirm_after: Option<u64>,
    /// Pool error attached to every submitted transaction
    pub pool_error: Option<String>,
    /// Number of pending lookups answered with 404 before the node admits
    /// knowing a transaction
    pub hidden_lookups: u32,
    /// Submitted transactions by id
    pub pending: HashMap<String, PendingEntry>,
    /// Rounds passed to wait-for-block-after, in call order
    pub waited_rounds: Vec<Round>,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            token: "a".repeat(64),
            last_round: 10,
            balances: HashMap::new(),
            fee_per_byte: 0,
            min_fee: 1000,
            confirm_after: Some(1),
            pool_error: None,
            hidden_lookups: 0,
            pending: HashMap::new(),
            waited_rounds: Vec::new(),
        }
    }
}

impl LedgerState {
    /// Sets the balance of an account.
    pub fn with_balance(mut self, address: Address, amount: MicroAlgos) -> Self {
        self.balances.insert(address, amount);
        self
    }

    /// Confirms every due transaction and applies its transfer.
    fn settle(&mut self) {
        let last_round = self.last_round;
        let mut transfers = Vec::new();

        for entry in self.pending.values_mut() {
            if entry.confirmed_round.is_some() || !entry.pool_error.is_empty() {
                continue;
            }
            if let Some(confirm_at) = entry.confirm_at {
                if confirm_at <= last_round {
                    entry.confirmed_round = Some(confirm_at);
                    transfers.push(entry.signed.transaction.clone());
                }
            }
        }

        for transaction in transfers {
            let sender = self.balances.entry(transaction.sender).or_insert(0);
            *sender = sender.saturating_sub(transaction.amount + transaction.fee);
            *self.balances.entry(transaction.receiver).or_insert(0) += transaction.amount;
        }
    }
}

type Shared = Arc<Mutex<LedgerState>>;

/// A running fake node.
pub struct FakeAlgod {
    addr: SocketAddr,
    state: Shared,
}

impl FakeAlgod {
    /// Starts the node on an ephemeral local port.
    pub fn start(state: LedgerState) -> Self {
        let state = Arc::new(Mutex::new(state));

        let status = warp::path!("v2" / "status")
            .and(warp::get())
            .and(api_token())
            .and(with_state(state.clone()))
            .and_then(handle_status);

        let wait = warp::path!("v2" / "status" / "wait-for-block-after" / u64)
            .and(warp::get())
            .and(api_token())
            .and(with_state(state.clone()))
            .and_then(handle_wait_for_block);

        let account = warp::path!("v2" / "accounts" / String)
            .and(warp::get())
            .and(api_token())
            .and(with_state(state.clone()))
            .and_then(handle_account);

        let params = warp::path!("v2" / "transactions" / "params")
            .and(warp::get())
            .and(api_token())
            .and(with_state(state.clone()))
            .and_then(handle_params);

        let submit = warp::path!("v2" / "transactions")
            .and(warp::post())
            .and(api_token())
            .and(warp::body::bytes())
            .and(with_state(state.clone()))
            .and_then(handle_submit);

        let pending = warp::path!("v2" / "transactions" / "pending" / String)
            .and(warp::get())
            .and(api_token())
            .and(with_state(state.clone()))
            .and_then(handle_pending);

        let routes = status.or(wait).or(account).or(params).or(submit).or(pending);
        let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        Self { addr, state }
    }

    /// Gets the base URL of the node.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Gets the balance of an account.
    pub fn balance(&self, address: &Address) -> MicroAlgos {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(address)
            .copied()
            .unwrap_or(0)
    }

    /// Gets a copy of the node state.
    pub fn snapshot(&self) -> LedgerState {
        self.state.lock().unwrap().clone()
    }
}

/// Provides the node state to handlers.
fn with_state(state: Shared) -> impl Filter<Extract = (Shared,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Extracts the API token header, if any.
fn api_token() -> impl Filter<Extract = (Option<String>,), Error = Rejection> + Clone {
    warp::header::optional::<String>("x-algo-api-token")
}

fn reply(status: StatusCode, body: serde_json::Value) -> Response {
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

fn error(status: StatusCode, message: &str) -> Response {
    reply(status, json!({ "message": message }))
}

fn unauthorized(state: &LedgerState, token: &Option<String>) -> Option<Response> {
    if token.as_deref() == Some(state.token.as_str()) {
        None
    } else {
        Some(error(StatusCode::UNAUTHORIZED, "Invalid API Token"))
    }
}

fn status_body(state: &LedgerState) -> serde_json::Value {
    json!({
        "last-round": state.last_round,
        "last-version": "future",
        "time-since-last-round": 0
    })
}

async fn handle_status(token: Option<String>, state: Shared) -> Result<Response, Rejection> {
    let state = state.lock().unwrap();
    if let Some(denied) = unauthorized(&state, &token) {
        return Ok(denied);
    }
    Ok(reply(StatusCode::OK, status_body(&state)))
}

async fn handle_wait_for_block(round: Round, token: Option<String>, state: Shared) -> Result<Response, Rejection> {
    let mut state = state.lock().unwrap();
    if let Some(denied) = unauthorized(&state, &token) {
        return Ok(denied);
    }

    state.waited_rounds.push(round);
    if state.last_round <= round {
        state.last_round = round + 1;
    }
    state.settle();

    Ok(reply(StatusCode::OK, status_body(&state)))
}

async fn handle_account(address: String, token: Option<String>, state: Shared) -> Result<Response, Rejection> {
    let state = state.lock().unwrap();
    if let Some(denied) = unauthorized(&state, &token) {
        return Ok(denied);
    }

    let parsed: Address = match address.parse() {
        Ok(parsed) => parsed,
        Err(_) => return Ok(error(StatusCode::BAD_REQUEST, "failed to parse the address")),
    };
    let amount = state.balances.get(&parsed).copied().unwrap_or(0);

    Ok(reply(
        StatusCode::OK,
        json!({
            "address": address,
            "amount": amount,
            "amount-without-pending-rewards": amount,
            "status": "Offline"
        }),
    ))
}

async fn handle_params(token: Option<String>, state: Shared) -> Result<Response, Rejection> {
    let state = state.lock().unwrap();
    if let Some(denied) = unauthorized(&state, &token) {
        return Ok(denied);
    }

    Ok(reply(
        StatusCode::OK,
        json!({
            "consensus-version": "future",
            "fee": state.fee_per_byte,
            "genesis-hash": BASE64_STANDARD.encode(GENESIS_HASH),
            "genesis-id": GENESIS_ID,
            "last-round": state.last_round,
            "min-fee": state.min_fee
        }),
    ))
}

async fn handle_submit(token: Option<String>, body: Bytes, state: Shared) -> Result<Response, Rejection> {
    let mut state = state.lock().unwrap();
    if let Some(denied) = unauthorized(&state, &token) {
        return Ok(denied);
    }

    let signed = match SignedTransaction::decode(&body) {
        Ok(signed) => signed,
        Err(e) => return Ok(error(StatusCode::BAD_REQUEST, &format!("msgpack decode error: {}", e))),
    };
    if signed.verify().is_err() {
        return Ok(error(StatusCode::BAD_REQUEST, "invalid signature"));
    }

    let transaction = &signed.transaction;
    if transaction.genesis_id != GENESIS_ID || transaction.genesis_hash != GENESIS_HASH {
        return Ok(error(StatusCode::BAD_REQUEST, "wrong genesis"));
    }
    let next_round = state.last_round + 1;
    if transaction.first_valid > next_round || transaction.last_valid < next_round {
        return Ok(error(StatusCode::BAD_REQUEST, "txn dead"));
    }
    if transaction.fee < state.min_fee {
        return Ok(error(StatusCode::BAD_REQUEST, "fee too small"));
    }
    let balance = state.balances.get(&transaction.sender).copied().unwrap_or(0);
    if balance < transaction.amount + transaction.fee {
        return Ok(error(
            StatusCode::BAD_REQUEST,
            &format!("overspend (account {}, balance {})", transaction.sender, balance),
        ));
    }

    let txid = match signed.id() {
        Ok(txid) => txid,
        Err(e) => return Ok(error(StatusCode::BAD_REQUEST, &e.to_string())),
    };
    let entry = PendingEntry {
        signed,
        confirm_at: state.confirm_after.map(|rounds| state.last_round + rounds),
        confirmed_round: None,
        pool_error: state.pool_error.clone().unwrap_or_default(),
    };
    state.pending.insert(txid.clone(), entry);
    state.settle();

    Ok(reply(StatusCode::OK, json!({ "txId": txid })))
}

async fn handle_pending(txid: String, token: Option<String>, state: Shared) -> Result<Response, Rejection> {
    let mut state = state.lock().unwrap();
    if let Some(denied) = unauthorized(&state, &token) {
        return Ok(denied);
    }

    if state.hidden_lookups > 0 {
        state.hidden_lookups -= 1;
        return Ok(error(StatusCode::NOT_FOUND, "txn does not exist"));
    }

    let entry = match state.pending.get(&txid) {
        Some(entry) => entry,
        None => return Ok(error(StatusCode::NOT_FOUND, "txn does not exist")),
    };

    let transaction = &entry.signed.transaction;
    let mut body = json!({
        "pool-error": entry.pool_error,
        "txn": {
            "sig": BASE64_STANDARD.encode(entry.signed.signature),
            "txn": {
                "amt": transaction.amount,
                "fee": transaction.fee,
                "fv": transaction.first_valid,
                "gen": transaction.genesis_id,
                "gh": BASE64_STANDARD.encode(transaction.genesis_hash),
                "lv": transaction.last_valid,
                "rcv": transaction.receiver.to_string(),
                "snd": transaction.sender.to_string(),
                "type": "pay"
            }
        }
    });
    if let Some(round) = entry.confirmed_round {
        body["confirmed-round"] = json!(round);
    }

    Ok(reply(StatusCode::OK, body))
}

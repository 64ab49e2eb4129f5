//! Waiting for transaction confirmation.

use crate::client::AlgodClient;
use crate::errors::AlgodError;
use crate::models::PendingTransaction;
use protocol::Round;
use tracing::{debug, info};

/// Blocks until `txid` is confirmed, for at most `wait_rounds` rounds.
///
/// A `wait_rounds` of zero waits without a round limit.
///
/// A transaction the node does not know yet is treated as still pending.
/// A transaction dropped from the pool fails immediately with
/// [`AlgodError::TransactionRejected`].
pub async fn wait_for_confirmation(
    client: &AlgodClient,
    txid: &str,
    wait_rounds: u64,
) -> Result<PendingTransaction, AlgodError> {
    let start_round = client.status().await?.last_round.saturating_add(1);
    let mut current_round = start_round;
    let end_round = match wait_rounds {
        0 => Round::MAX,
        rounds => start_round.saturating_add(rounds),
    };

    while current_round < end_round {
        match client.pending_transaction_information(txid).await {
            Ok(pending) => {
                if pending.is_confirmed() {
                    info!(
                        "Transaction {} confirmed in round {}",
                        txid,
                        pending.confirmed_round.unwrap_or_default()
                    );
                    return Ok(pending);
                }
                if !pending.pool_error.is_empty() {
                    return Err(AlgodError::TransactionRejected {
                        txid: txid.to_string(),
                        reason: pending.pool_error,
                    });
                }
            }
            Err(e) if e.is_not_found() => {
                debug!("Transaction {} not visible yet", txid);
            }
            Err(e) => return Err(e),
        }

        debug!("Waiting for round {}", current_round);
        client.status_after_block(current_round).await?;
        current_round += 1;
    }

    Err(AlgodError::ConfirmationTimeout {
        txid: txid.to_string(),
        rounds: wait_rounds,
    })
}

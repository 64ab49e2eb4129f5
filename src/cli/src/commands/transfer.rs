//! Transfer command: send Algos from a mnemonic account to an address.

use crate::errors::CliError;
use algod::{wait_for_confirmation, AlgodClient, PendingTransaction};
use colored::Colorize;
use protocol::{Account, Address, MicroAlgos, Transaction};
use std::io::Write;
use tracing::{debug, info};

/// Parameters of a single transfer.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Mnemonic of the paying account
    pub sender_mnemonic: String,
    /// Address of the receiving account
    pub receiver: String,
    /// Amount to send
    pub amount: MicroAlgos,
    /// Rounds to wait for confirmation
    pub wait_rounds: u64,
    /// Rounds the transaction stays valid
    pub validity_rounds: u64,
}

/// Balances of both parties at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balances {
    /// Sender balance
    pub sender: MicroAlgos,
    /// Receiver balance
    pub receiver: MicroAlgos,
}

/// Outcome of a completed transfer.
#[derive(Debug, Clone)]
pub struct TransferReport {
    /// Address of the sender
    pub sender: Address,
    /// Address of the receiver
    pub receiver: Address,
    /// Balances before submission
    pub before: Balances,
    /// Balances after confirmation
    pub after: Balances,
    /// Fee paid by the sender
    pub fee: MicroAlgos,
    /// Id of the confirmed transaction
    pub txid: String,
    /// The confirmed transaction as reported by the node
    pub confirmation: PendingTransaction,
}

/// Runs the transfer command, writing progress lines to `out`.
///
/// Balances are written before anything is submitted, so a failure later on
/// still leaves them in the output.
pub async fn run<W: Write>(
    client: &AlgodClient,
    request: &TransferRequest,
    out: &mut W,
) -> Result<TransferReport, CliError> {
    // Derive the sender keys
    let account = Account::from_mnemonic(&request.sender_mnemonic)?;
    let sender = account.address();
    let receiver: Address = request.receiver.parse()?;
    info!("Sending {} microAlgos from {} to {}", request.amount, sender, receiver);

    let before = fetch_balances(client, &sender, &receiver).await?;
    write_balances(out, &before)?;

    // Build, sign and submit
    let params = client
        .suggested_params()
        .await?
        .to_suggested_params(request.validity_rounds)?;
    debug!(
        "Suggested params: rounds {}..{}, fee {} per byte",
        params.first_valid, params.last_valid, params.fee
    );

    let transaction = Transaction::payment(sender, receiver, request.amount, &params)?;
    let fee = transaction.fee;
    let signed = account.sign_transaction(transaction)?;
    let txid = client.send_transaction(&signed).await?;
    writeln!(out, "{} {}", "Transaction ID:".green(), txid)?;

    let confirmation = wait_for_confirmation(client, &txid, request.wait_rounds).await?;
    writeln!(out, "{} {}", "Transaction information:".green(), confirmation)?;

    let after = fetch_balances(client, &sender, &receiver).await?;
    write_balances(out, &after)?;

    Ok(TransferReport {
        sender,
        receiver,
        before,
        after,
        fee,
        txid,
        confirmation,
    })
}

async fn fetch_balances(
    client: &AlgodClient,
    sender: &Address,
    receiver: &Address,
) -> Result<Balances, CliError> {
    let sender_info = client.account_information(sender).await?;
    let receiver_info = client.account_information(receiver).await?;

    Ok(Balances {
        sender: sender_info.amount,
        receiver: receiver_info.amount,
    })
}

fn write_balances<W: Write>(out: &mut W, balances: &Balances) -> Result<(), CliError> {
    writeln!(
        out,
        "{}   {} microAlgos",
        "Sender account balance:".green(),
        balances.sender
    )?;
    writeln!(
        out,
        "{} {} microAlgos",
        "Receiver account balance:".green(),
        balances.receiver
    )?;
    Ok(())
}

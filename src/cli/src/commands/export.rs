//! Export command: list the accounts of a private network's wallets.
//!
//! Each node of a private network keeps its root account in
//! `wallet_<i>.rootkey`, an SQLite database with a single `RootAccount` row.
//! The command writes every account as a YAML list entry holding its address
//! and mnemonic, ready to be pasted into a chain configuration.

use crate::errors::CliError;
use protocol::{Account, Address, RootSecrets};
use rusqlite::{Connection, OpenFlags};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// An account recovered from a root key file.
#[derive(Debug, Clone)]
pub struct ExportedWallet {
    /// Index of the wallet in the network directory
    pub index: u64,
    /// Address of the root account
    pub address: Address,
    /// Mnemonic of the root account
    pub mnemonic: String,
}

/// Gets the path of the root key file of wallet `index`.
pub fn root_key_path(net_root: &Path, index: u64) -> PathBuf {
    net_root.join(format!("wallet_{}.rootkey", index))
}

/// Reads the root account stored in a root key file.
pub fn read_root_account(path: &Path) -> Result<Account, CliError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;

    let rows: i64 = conn.query_row("SELECT count(*) FROM RootAccount", [], |row| row.get(0))?;
    if rows != 1 {
        warn!("{} holds {} root accounts, using the first", path.display(), rows);
    }

    let record: Vec<u8> = conn.query_row("SELECT data FROM RootAccount", [], |row| row.get(0))?;
    let account = RootSecrets::decode(&record)?.account()?;
    debug!("Read root account {} from {}", account.address(), path.display());

    Ok(account)
}

/// Runs the export command for wallets `0..count` under `net_root`.
///
/// Every wallet that can be read is written to `out`, in index order. If any
/// wallet fails the command still writes the others, then returns
/// [`CliError::ExportIncomplete`].
pub fn run<W: Write>(net_root: &Path, count: u64, out: &mut W) -> Result<Vec<ExportedWallet>, CliError> {
    let mut exported = Vec::new();
    let mut failed = 0;

    for index in 0..count {
        let path = root_key_path(net_root, index);
        let account = match read_root_account(&path) {
            Ok(account) => account,
            Err(e) => {
                error!("Failed to export {}: {}", path.display(), e);
                failed += 1;
                continue;
            }
        };

        let wallet = ExportedWallet {
            index,
            address: account.address(),
            mnemonic: account.mnemonic(),
        };
        writeln!(out, "- address:  {}", wallet.address)?;
        writeln!(out, "  mnemonic: {}", wallet.mnemonic)?;
        exported.push(wallet);
    }
    out.flush()?;

    info!("Exported {} of {} wallets", exported.len(), count);
    if failed > 0 {
        return Err(CliError::ExportIncomplete { failed, total: count });
    }

    Ok(exported)
}

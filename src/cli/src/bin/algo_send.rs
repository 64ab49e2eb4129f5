//! Send Algos from one account to another.

use algod::AlgodClient;
use anyhow::Result;
use cli::options::SendOptions;
use cli::transfer;
use std::io::IsTerminal;
use structopt::StructOpt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    cli::init_tracing()?;

    // Flags, then the configuration file, then defaults
    let settings = SendOptions::from_args().resolve()?;

    colored::control::set_override(std::io::stdout().is_terminal());

    let client = AlgodClient::new(&settings.node.address, &settings.node.token)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    transfer::run(&client, &settings.request, &mut out).await?;

    Ok(())
}

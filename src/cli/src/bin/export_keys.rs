//! Write the root accounts of a private network's wallets to a chain config.

use anyhow::{Context, Result};
use cli::export;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use structopt::StructOpt;

/// Command line arguments for the wallet export tool.
#[derive(Debug, StructOpt)]
#[structopt(name = "export-keys", about = "Write the addresses and mnemonics of network wallets to a file")]
struct Opt {
    /// Directory holding the wallet_<i>.rootkey files
    #[structopt(parse(from_os_str))]
    net_root: PathBuf,

    /// Number of wallets to export
    count: u64,

    /// Output file for the account list
    #[structopt(parse(from_os_str))]
    chain_config: PathBuf,
}

fn main() -> Result<()> {
    cli::init_tracing()?;

    let opt = Opt::from_args();

    let file = File::create(&opt.chain_config)
        .with_context(|| format!("Failed to create {}", opt.chain_config.display()))?;
    let mut out = BufWriter::new(file);
    export::run(&opt.net_root, opt.count, &mut out)?;

    Ok(())
}

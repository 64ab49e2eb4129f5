//! Print the raw private key stored in an encrypted keystore.

use anyhow::Result;
use cli::extract;
use std::path::PathBuf;
use structopt::StructOpt;

/// Command line arguments for the key extraction tool.
#[derive(Debug, StructOpt)]
#[structopt(name = "extract-key", about = "Print the raw private key of an encrypted keystore")]
struct Opt {
    /// Path to the keystore file
    #[structopt(parse(from_os_str))]
    keystore: PathBuf,

    /// Password of the keystore
    password: String,
}

fn main() -> Result<()> {
    cli::init_tracing()?;

    let opt = Opt::from_args();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    extract::run(&opt.keystore, &opt.password, &mut out)?;

    Ok(())
}

//! Command line tools for sending Algos, exporting wallet keys and
//! extracting keystore keys.

pub mod commands;
pub mod errors;
pub mod options;

// Re-export commonly used types and functions
pub use commands::{export, extract, transfer};
pub use errors::CliError;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so stdout only carries the tool output. The level is
/// taken from `RUST_LOG`.
pub fn init_tracing() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

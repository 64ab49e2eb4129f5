//! Commands for the command line tools.

pub mod export;
pub mod extract;
pub mod transfer;

//! CLI commands module.

use anyhow::Result;
use clap::Subcommand;

mod account;
mod sign;

#[derive(Subcommand)]
pub enum Commands {
    /// Wallet keypair management
    Account(account::AccountArgs),
    /// Sign a challenge message with a wallet key
    Sign(sign::SignArgs),
    /// Check a wallet signature over a message
    Verify(sign::VerifyArgs),
}

pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Account(args) => account::run(args),
        Commands::Sign(args) => sign::sign(args),
        Commands::Verify(args) => sign::verify(args),
    }
}

//! Signing and checking ownership challenges.

use super::account::load_keypair;
use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use starchain_chain::Challenge;
use starchain_core::{Address, Ed25519Verifier, Keypair, SignatureVerifier};
use std::path::PathBuf;

#[derive(Args)]
pub struct SignArgs {
    /// Directory holding keypair files
    #[arg(short, long, default_value = "./keys")]
    keys_dir: PathBuf,

    /// Keypair name (file without .json extension)
    #[arg(long)]
    key: String,

    /// Challenge message returned by /requestValidation
    message: String,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Wallet address (hex format)
    address: String,

    /// Signed message
    message: String,

    /// Wallet signature (hex format)
    signature: String,
}

pub fn sign(args: SignArgs) -> Result<()> {
    let keypair = load_keypair(&args.keys_dir, &args.key)?;
    let signature = sign_challenge(&keypair, &args.message)?;

    println!();
    println!("{}", "Signed challenge:".bold().cyan());
    println!();
    println!("  Address:   {}", keypair.address().to_hex().bright_yellow());
    println!("  Message:   {}", args.message.bright_black());
    println!("  Signature: {}", signature.bright_green());
    println!();

    Ok(())
}

pub fn verify(args: VerifyArgs) -> Result<()> {
    let address = Address::from_hex(&args.address)
        .with_context(|| format!("Invalid address format: {}", args.address))?;

    if !Ed25519Verifier.verify(&args.message, &address, &args.signature) {
        bail!("Signature does not prove ownership of {}", address);
    }

    println!(
        "{}  Signature is valid for {}",
        "✓".green().bold(),
        address.to_hex().bright_yellow()
    );
    Ok(())
}

/// Sign `message`, refusing registry challenges issued to another address.
fn sign_challenge(keypair: &Keypair, message: &str) -> Result<String> {
    match Challenge::parse(message) {
        Ok(challenge) if challenge.address != keypair.address() => bail!(
            "Challenge was issued to {}, but key belongs to {}",
            challenge.address,
            keypair.address()
        ),
        Ok(_) => {}
        Err(e) => eprintln!("{} {}", "warning:".yellow().bold(), e),
    }
    Ok(keypair.sign_wallet(message).to_hex())
}

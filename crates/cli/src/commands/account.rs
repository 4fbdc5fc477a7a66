//! Wallet keypair management.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use starchain_core::Keypair;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    command: AccountCommand,
}

#[derive(Subcommand)]
enum AccountCommand {
    /// Generate a new keypair
    New {
        /// Directory holding keypair files
        #[arg(short, long, default_value = "./keys")]
        keys_dir: PathBuf,

        /// Name for the keypair file
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Show a stored keypair's address and public key
    Show {
        /// Directory holding keypair files
        #[arg(short, long, default_value = "./keys")]
        keys_dir: PathBuf,

        /// Keypair name (file without .json extension)
        name: String,
    },
    /// List all keypairs
    List {
        /// Directory holding keypair files
        #[arg(short, long, default_value = "./keys")]
        keys_dir: PathBuf,
    },
}

/// On-disk keypair format.
#[derive(Debug, Serialize, Deserialize)]
pub struct KeyFile {
    pub address: String,
    pub public_key: String,
    pub private_key: String,
}

impl KeyFile {
    fn from_keypair(keypair: &Keypair) -> Self {
        Self {
            address: keypair.address().to_hex(),
            public_key: hex::encode(keypair.public_key.as_bytes()),
            private_key: hex::encode(keypair.private_key()),
        }
    }
}

pub fn run(args: AccountArgs) -> Result<()> {
    match args.command {
        AccountCommand::New { keys_dir, name } => new_keypair(&keys_dir, name),
        AccountCommand::Show { keys_dir, name } => show_keypair(&keys_dir, &name),
        AccountCommand::List { keys_dir } => list_keypairs(&keys_dir),
    }
}

fn new_keypair(keys_dir: &Path, name: Option<String>) -> Result<()> {
    let keypair = Keypair::generate();
    let key_file = save_keypair(keys_dir, name.as_deref(), &keypair)?;

    println!("{}", "Generated new keypair:".bold().cyan());
    println!();
    println!("  Address:     {}", keypair.address().to_hex().bright_yellow());
    println!(
        "  Public Key:  {}",
        hex::encode(keypair.public_key.as_bytes()).bright_black()
    );
    println!();
    println!(
        "{}  Saved to: {}",
        "✓".green().bold(),
        key_file.display().to_string().bright_black()
    );
    println!();
    println!("{}", "Keep your private key safe!".yellow().bold());

    Ok(())
}

fn show_keypair(keys_dir: &Path, name: &str) -> Result<()> {
    let keypair = load_keypair(keys_dir, name)?;

    println!();
    println!("{}", "Keypair:".bold().cyan());
    println!();
    println!("  Name:        {}", name.bright_cyan());
    println!("  Address:     {}", keypair.address().to_hex().bright_yellow());
    println!(
        "  Public Key:  {}",
        hex::encode(keypair.public_key.as_bytes()).bright_black()
    );
    println!();

    Ok(())
}

fn list_keypairs(keys_dir: &Path) -> Result<()> {
    let names = keypair_names(keys_dir)?;

    println!();
    if names.is_empty() {
        println!("{}", "No keypairs found.".yellow());
        println!(
            "Use {} to create one.",
            "starchain account new".bright_cyan()
        );
        println!();
        return Ok(());
    }

    println!("{}", "Keypairs:".bold().cyan());
    println!();
    for name in names {
        let keypair = load_keypair(keys_dir, &name)?;
        println!(
            "  {:<20} {}",
            name.bright_cyan(),
            keypair.address().to_hex().bright_yellow()
        );
    }
    println!();

    Ok(())
}

/// Write `keypair` under `keys_dir`, named after the address if no name is given.
pub fn save_keypair(keys_dir: &Path, name: Option<&str>, keypair: &Keypair) -> Result<PathBuf> {
    fs::create_dir_all(keys_dir)
        .with_context(|| format!("Failed to create keys directory: {:?}", keys_dir))?;

    let filename = match name {
        Some(n) => format!("{}.json", n),
        None => format!("wallet_{}.json", &keypair.address().to_hex()[2..10]),
    };
    let key_file = keys_dir.join(filename);
    if key_file.exists() {
        bail!("Keypair file already exists: {}", key_file.display());
    }

    let contents = serde_json::to_string_pretty(&KeyFile::from_keypair(keypair))?;
    fs::write(&key_file, contents)?;
    Ok(key_file)
}

/// Load the keypair stored as `<name>.json` under `keys_dir`.
pub fn load_keypair(keys_dir: &Path, name: &str) -> Result<Keypair> {
    let key_file = keys_dir.join(format!("{}.json", name));
    if !key_file.exists() {
        bail!(
            "Keypair file not found: {}. Use 'starchain account new' to create one.",
            key_file.display()
        );
    }

    let contents = fs::read_to_string(&key_file)?;
    let stored: KeyFile = serde_json::from_str(&contents)
        .with_context(|| format!("Malformed keypair file: {}", key_file.display()))?;

    let keypair = Keypair::from_private_hex(&stored.private_key)
        .context("Invalid private key in keypair file")?;
    if keypair.address().to_hex() != stored.address.to_lowercase() {
        bail!(
            "Keypair file {} lists address {} but its key derives {}",
            key_file.display(),
            stored.address,
            keypair.address()
        );
    }
    Ok(keypair)
}

fn keypair_names(keys_dir: &Path) -> Result<Vec<String>> {
    if !keys_dir.exists() {
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = fs::read_dir(keys_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    names.sort();
    Ok(names)
}

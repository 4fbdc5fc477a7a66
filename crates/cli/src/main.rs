//! starchain wallet CLI entry point.

use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "starchain")]
#[command(about = "Wallet tools for the starchain star registry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<commands::Commands>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(cmd) => {
            if let Err(e) = commands::run(cmd) {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("starchain - wallet tools for the star registry");
            println!("Run 'starchain --help' for usage information.");
        }
    }
}

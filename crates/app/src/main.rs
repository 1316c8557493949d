//! Karat CLI

use std::process;

use clap::Parser;
use tracing::error;

mod cli;

#[tokio::main]
pub async fn main() {
    karat_app::config::load_dotenv();

    let cli = cli::Cli::parse();

    if let Err(message) = cli.run().await {
        error!(%message, "command failed");
        eprintln!("{message}");
        process::exit(1);
    }
}

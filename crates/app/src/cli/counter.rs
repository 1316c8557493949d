use std::io;

use clap::{Args, Subcommand};
use karat_app::config::AppConfig;

use crate::cli::context;

#[derive(Debug, Args)]
pub(crate) struct CounterCommand {
    #[command(subcommand)]
    command: CounterSubcommand,
}

#[derive(Debug, Subcommand)]
enum CounterSubcommand {
    /// Show the pieces on the counter with their totals
    Summary(SummaryArgs),
}

#[derive(Debug, Args)]
pub(crate) struct SummaryArgs {
    #[command(flatten)]
    config: AppConfig,
}

pub(crate) async fn run(command: CounterCommand) -> Result<(), String> {
    match command.command {
        CounterSubcommand::Summary(args) => summary(args).await,
    }
}

async fn summary(args: SummaryArgs) -> Result<(), String> {
    let ctx = context(&args.config)?;

    let summary = ctx
        .catalog
        .counter_summary()
        .await
        .map_err(|error| format!("failed to total the counter: {error}"))?;

    if summary.products().is_empty() {
        println!("the counter is empty");
        return Ok(());
    }

    summary
        .write_to(io::stdout().lock())
        .map_err(|error| format!("failed to print counter: {error}"))
}

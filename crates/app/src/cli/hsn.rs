use clap::{Args, Subcommand};
use karat_app::config::AppConfig;

use crate::cli::context;

#[derive(Debug, Args)]
pub(crate) struct HsnCommand {
    #[command(subcommand)]
    command: HsnSubcommand,
}

#[derive(Debug, Subcommand)]
enum HsnSubcommand {
    /// Draw an HSN code no stored product uses
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
pub(crate) struct GenerateArgs {
    #[command(flatten)]
    config: AppConfig,
}

pub(crate) async fn run(command: HsnCommand) -> Result<(), String> {
    match command.command {
        HsnSubcommand::Generate(args) => {
            let ctx = context(&args.config)?;

            let hsn = ctx
                .catalog
                .generate_hsn()
                .await
                .map_err(|error| format!("failed to generate HSN code: {error}"))?;

            println!("{hsn}");

            Ok(())
        }
    }
}

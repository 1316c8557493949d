use clap::{Parser, Subcommand};
use karat_app::{
    config::{AppConfig, LoggingConfig},
    context::AppContext,
    observability,
};

mod counter;
mod hsn;
mod label;
mod photo;
mod price;
mod product;

#[derive(Debug, Parser)]
#[command(name = "karat", about = "Jewelry catalog and label tools", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Product(product::ProductCommand),
    Counter(counter::CounterCommand),
    Hsn(hsn::HsnCommand),
    Price(price::PriceCommand),
    Label(label::LabelCommand),
    Photo(photo::PhotoCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Product(command) => product::run(command).await,
            Commands::Counter(command) => counter::run(command).await,
            Commands::Hsn(command) => hsn::run(command).await,
            Commands::Price(command) => price::run(command),
            Commands::Label(command) => label::run(command).await,
            Commands::Photo(command) => photo::run(command).await,
        }
    }
}

fn context(config: &AppConfig) -> Result<AppContext, String> {
    AppContext::from_config(config).map_err(|error| format!("failed to start: {error}"))
}

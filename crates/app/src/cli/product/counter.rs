use clap::Args;
use karat::products::ProductId;
use karat_app::config::AppConfig;

use crate::cli::context;

#[derive(Debug, Args)]
pub(crate) struct CounterProductArgs {
    #[command(flatten)]
    config: AppConfig,

    /// Product id
    id: ProductId,

    /// Take the product off the counter instead
    #[arg(long)]
    remove: bool,
}

pub(crate) async fn run(args: CounterProductArgs) -> Result<(), String> {
    let ctx = context(&args.config)?;

    let product = ctx
        .catalog
        .set_counter(args.id, !args.remove)
        .await
        .map_err(|error| format!("failed to update counter for {}: {error}", args.id))?;

    if product.selected {
        println!("{} ({}) is on the counter", product.name, product.hsn);
    } else {
        println!("{} ({}) is off the counter", product.name, product.hsn);
    }

    Ok(())
}

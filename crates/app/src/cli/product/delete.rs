use clap::Args;
use karat::products::ProductId;
use karat_app::config::AppConfig;

use crate::cli::context;

#[derive(Debug, Args)]
pub(crate) struct DeleteProductArgs {
    #[command(flatten)]
    config: AppConfig,

    /// Product id
    id: ProductId,
}

pub(crate) async fn run(args: DeleteProductArgs) -> Result<(), String> {
    let ctx = context(&args.config)?;

    ctx.catalog
        .delete(args.id)
        .await
        .map_err(|error| format!("failed to delete product {}: {error}", args.id))?;

    println!("deleted product {}", args.id);

    Ok(())
}

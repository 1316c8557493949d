use std::path::PathBuf;

use clap::{Args, Subcommand};
use karat::{labels::LabelFields, products::ProductId};
use karat_app::{
    config::AppConfig,
    print::{CommandSurface, FileSurface, PrintSurface},
};

use crate::cli::context;

/// File written when no output or print command is configured.
const DEFAULT_OUTPUT: &str = "label.pdf";

#[derive(Debug, Args)]
pub(crate) struct LabelCommand {
    #[command(subcommand)]
    command: LabelSubcommand,
}

#[derive(Debug, Subcommand)]
enum LabelSubcommand {
    /// Render and print a price label
    Print(PrintArgs),
}

#[derive(Debug, Args)]
pub(crate) struct PrintArgs {
    #[command(flatten)]
    config: AppConfig,

    /// Print the label of a stored product
    #[arg(long, conflicts_with_all = ["name", "price", "weight", "hsn"])]
    id: Option<ProductId>,

    /// Product name
    #[arg(long, default_value = "")]
    name: String,

    /// Price
    #[arg(long, default_value = "")]
    price: String,

    /// Gross weight in grams
    #[arg(long, default_value = "")]
    weight: String,

    /// HSN code
    #[arg(long, default_value = "")]
    hsn: String,

    /// Collection name
    #[arg(long, default_value = "")]
    collection: String,

    /// Size
    #[arg(long, default_value = "")]
    size: String,

    /// Set diamond weight in carats
    #[arg(long, default_value = "")]
    diamond_weight: String,

    /// Gold purity in karats
    #[arg(long, default_value = "")]
    kt: String,

    /// Diamond clarity grade
    #[arg(long, default_value = "")]
    sihi: String,

    /// Write the label to this file instead of the print command
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) async fn run(command: LabelCommand) -> Result<(), String> {
    match command.command {
        LabelSubcommand::Print(args) => print(args).await,
    }
}

async fn print(args: PrintArgs) -> Result<(), String> {
    let ctx = context(&args.config)?;

    let fields = match args.id {
        Some(id) => LabelFields::from(
            &ctx.catalog
                .get(id)
                .await
                .map_err(|error| format!("failed to load product {id}: {error}"))?,
        ),
        None => LabelFields {
            name: args.name,
            price: args.price,
            weight: args.weight,
            hsn: args.hsn,
            collection_name: args.collection,
            size: args.size,
            diamond_weight: args.diamond_weight,
            kt: args.kt,
            sihi: args.sihi,
        },
    };

    let surface = surface(args.output, ctx.print_command.as_deref())?;

    ctx.labels
        .print(&fields, surface.as_ref())
        .await
        .map_err(|error| format!("failed to print label: {error}"))
}

/// An explicit output file wins over the configured print command.
pub(crate) fn surface(
    output: Option<PathBuf>,
    command: Option<&str>,
) -> Result<Box<dyn PrintSurface>, String> {
    match (output, command) {
        (Some(path), _) => Ok(Box::new(FileSurface::new(path))),
        (None, Some(command)) => CommandSurface::parse(command)
            .map(|surface| Box::new(surface) as Box<dyn PrintSurface>)
            .map_err(|error| format!("invalid print command: {error}")),
        (None, None) => Ok(Box::new(FileSurface::new(DEFAULT_OUTPUT))),
    }
}

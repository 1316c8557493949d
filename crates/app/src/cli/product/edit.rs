use std::path::PathBuf;

use clap::Args;
use karat::{
    forms::{EditEvent, EditField, EditForm},
    products::ProductId,
};
use karat_app::config::AppConfig;

use crate::cli::{
    context,
    product::{add::read_photo, print_product},
};

#[derive(Debug, Args)]
pub(crate) struct EditProductArgs {
    #[command(flatten)]
    config: AppConfig,

    /// Product id
    id: ProductId,

    /// New name
    #[arg(long)]
    name: Option<String>,

    /// New list price
    #[arg(long)]
    price: Option<String>,

    /// New size
    #[arg(long)]
    size: Option<String>,

    /// New category
    #[arg(long)]
    category: Option<String>,

    /// New description
    #[arg(long)]
    description: Option<String>,

    /// New discount percent
    #[arg(long)]
    discount: Option<String>,

    /// Replacement photo file
    #[arg(long)]
    photo: Option<PathBuf>,
}

pub(crate) async fn run(args: EditProductArgs) -> Result<(), String> {
    let ctx = context(&args.config)?;

    let product = ctx
        .catalog
        .get(args.id)
        .await
        .map_err(|error| format!("failed to load product {}: {error}", args.id))?;

    let mut events: Vec<EditEvent> = [
        (EditField::Name, args.name),
        (EditField::Price, args.price),
        (EditField::Size, args.size),
        (EditField::Category, args.category),
        (EditField::Description, args.description),
        (EditField::Discount, args.discount),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|value| EditEvent::FieldChanged(field, value)))
    .collect();

    if let Some(path) = args.photo {
        events.push(EditEvent::PhotoSelected(read_photo(path).await?));
    }

    let form = events
        .into_iter()
        .fold(EditForm::from_product(&product), EditForm::apply);

    let updated = ctx
        .catalog
        .update(args.id, &form)
        .await
        .map_err(|error| format!("failed to update product {}: {error}", args.id))?;

    print_product(&updated);

    Ok(())
}

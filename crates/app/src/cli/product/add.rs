use std::path::PathBuf;

use clap::Args;
use karat::{
    forms::{FormEvent, FormField, ProductForm},
    labels::LabelFields,
    photos::PhotoUpload,
};
use karat_app::config::AppConfig;
use tokio::fs;

use crate::cli::{context, label::surface, product::print_product};

#[derive(Debug, Args)]
pub(crate) struct AddProductArgs {
    #[command(flatten)]
    config: AppConfig,

    /// Product name
    #[arg(long)]
    name: String,

    /// List price; derived from the weights and rates when a diamond weight
    /// is given and this is omitted
    #[arg(long)]
    price: Option<String>,

    /// Gross weight in grams
    #[arg(long)]
    weight: String,

    /// Set diamond weight in carats
    #[arg(long)]
    diamond_weight: Option<String>,

    /// Category, e.g. ring or pendants
    #[arg(long)]
    category: String,

    /// Collection name
    #[arg(long, default_value = "")]
    collection: String,

    /// Metal or material
    #[arg(long, default_value = "")]
    material: String,

    /// Size; `universal` prints as U on the label
    #[arg(long)]
    size: String,

    /// Free-form description
    #[arg(long, default_value = "")]
    description: String,

    /// Gold purity in karats
    #[arg(long)]
    kt: Option<String>,

    /// Diamond clarity grade
    #[arg(long)]
    sihi: Option<String>,

    /// Discount percent
    #[arg(long)]
    discount: Option<String>,

    /// HSN code; a free one is generated when omitted
    #[arg(long)]
    hsn: Option<String>,

    /// Four digit code of a captured photo
    #[arg(long)]
    photo_code: Option<String>,

    /// Photo file to upload; takes precedence over --photo-code
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Print a label once the product is saved
    #[arg(long)]
    print: bool,

    /// Write the label to this file instead of the print command
    #[arg(long, requires = "print")]
    output: Option<PathBuf>,
}

pub(crate) async fn run(args: AddProductArgs) -> Result<(), String> {
    let ctx = context(&args.config)?;

    let mut events = vec![
        FormEvent::FieldChanged(FormField::Name, args.name),
        FormEvent::FieldChanged(FormField::Weight, args.weight),
        FormEvent::FieldChanged(FormField::Category, args.category),
        FormEvent::FieldChanged(FormField::CollectionName, args.collection),
        FormEvent::FieldChanged(FormField::Material, args.material),
        FormEvent::FieldChanged(FormField::Size, args.size),
        FormEvent::FieldChanged(FormField::Description, args.description),
    ];

    events.extend(
        [
            (FormField::Kt, args.kt),
            (FormField::Sihi, args.sihi),
            (FormField::Discount, args.discount),
            (FormField::PhotoCode, args.photo_code),
            // Entered after the weights so an explicit price wins over the
            // derived one.
            (FormField::DiamondWeight, args.diamond_weight),
            (FormField::Price, args.price),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| FormEvent::FieldChanged(field, value))),
    );

    match args.hsn {
        Some(hsn) => events.push(FormEvent::FieldChanged(FormField::Hsn, hsn)),
        None => events.push(FormEvent::HsnGenerated(
            ctx.catalog
                .generate_hsn()
                .await
                .map_err(|error| format!("failed to generate HSN code: {error}"))?,
        )),
    }

    if let Some(path) = args.photo {
        events.push(FormEvent::PhotoSelected(read_photo(path).await?));
    }

    let form = events
        .into_iter()
        .fold(ProductForm::new(ctx.rates), ProductForm::apply);

    let (product, _next) = ctx
        .catalog
        .submit(form)
        .await
        .map_err(|error| format!("failed to save product: {error}"))?;

    print_product(&product);

    if args.print {
        let surface = surface(args.output, ctx.print_command.as_deref())?;

        ctx.labels
            .print(&LabelFields::from(&product), surface.as_ref())
            .await
            .map_err(|error| format!("product saved but label failed: {error}"))?;
    }

    Ok(())
}

pub(crate) async fn read_photo(path: PathBuf) -> Result<PhotoUpload, String> {
    let bytes = fs::read(&path)
        .await
        .map_err(|error| format!("failed to read photo {}: {error}", path.display()))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("photo.jpg");

    Ok(PhotoUpload::new(file_name, bytes))
}

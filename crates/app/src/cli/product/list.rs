use clap::Args;
use karat_app::{
    backend::Direction,
    catalog::{CatalogPage, ListRequest},
    config::AppConfig,
    domain::products::ProductColumn,
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::cli::context;

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    #[command(flatten)]
    config: AppConfig,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    page: u64,

    /// Case-insensitive name search
    #[arg(long)]
    search: Option<String>,

    /// Column to order by
    #[arg(long, value_enum, default_value_t)]
    order: ProductColumn,

    /// Sort direction
    #[arg(long, value_enum, default_value_t)]
    direction: Direction,
}

pub(crate) async fn run(args: ListProductsArgs) -> Result<(), String> {
    let ctx = context(&args.config)?;

    let page = ctx
        .catalog
        .list(&ListRequest {
            page: args.page,
            search: args.search,
            order: args.order,
            direction: args.direction,
        })
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    if page.products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    println!("{}", table(&page));
    println!(
        "page {} of {} ({} products)",
        page.page, page.total_pages, page.total
    );

    Ok(())
}

fn table(page: &CatalogPage) -> tabled::Table {
    let mut builder = Builder::default();

    builder.push_record([
        "ID", "HSN", "Name", "Category", "Size", "Weight", "Price", "Discount", "Counter",
    ]);

    for product in &page.products {
        builder.push_record([
            product.id.to_string(),
            product.hsn.to_string(),
            product.name.clone(),
            product.category.to_string(),
            product.size.clone(),
            format!("{}g", product.weight),
            product.price.to_string(),
            format!("{}%", product.discount),
            if product.selected { "yes" } else { "" }.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(5..8), Alignment::right());

    table
}

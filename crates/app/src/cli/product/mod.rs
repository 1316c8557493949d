use clap::{Args, Subcommand};
use karat::products::Product;

mod add;
mod counter;
mod delete;
mod edit;
mod list;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Add(add::AddProductArgs),
    Edit(edit::EditProductArgs),
    List(list::ListProductsArgs),
    Delete(delete::DeleteProductArgs),
    Counter(counter::CounterProductArgs),
}

pub(crate) async fn run(command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Add(args) => add::run(args).await,
        ProductSubcommand::Edit(args) => edit::run(args).await,
        ProductSubcommand::List(args) => list::run(args).await,
        ProductSubcommand::Delete(args) => delete::run(args).await,
        ProductSubcommand::Counter(args) => counter::run(args).await,
    }
}

fn print_product(product: &Product) {
    println!("id: {}", product.id);
    println!("hsn: {}", product.hsn);
    println!("name: {}", product.name);
    println!("category: {}", product.category);
    println!("size: {}", product.size);
    println!("weight: {}g", product.weight);

    if let Some(diamond_weight) = product.diamond_weight {
        println!("diamond_weight: {diamond_weight}ct");
        println!("net_weight: {}g", product.net_weight());
    }

    println!("price: {}", product.price);
    println!("discount: {}%", product.discount);
    println!(
        "stock_photo: {}",
        product.stock_photo.as_deref().unwrap_or("none")
    );
    println!("on_counter: {}", product.selected);
}

use clap::{Args, Subcommand};
use karat::pricing::{NET_WEIGHT_DECIMALS, fixed};
use karat_app::config::pricing::PricingConfig;
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub(crate) struct PriceCommand {
    #[command(subcommand)]
    command: PriceSubcommand,
}

#[derive(Debug, Subcommand)]
enum PriceSubcommand {
    /// Price a piece from its weights
    Quote(QuoteArgs),
}

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    #[command(flatten)]
    pricing: PricingConfig,

    /// Gross weight in grams
    #[arg(long)]
    weight: Decimal,

    /// Set diamond weight in carats
    #[arg(long, default_value = "0")]
    diamond_weight: Decimal,
}

pub(crate) fn run(command: PriceCommand) -> Result<(), String> {
    match command.command {
        PriceSubcommand::Quote(args) => {
            if args.weight.is_sign_negative() || args.diamond_weight.is_sign_negative() {
                return Err("weights cannot be negative".to_string());
            }

            let quote = args.pricing.rates().quote(args.weight, args.diamond_weight);

            println!("net_weight: {}g", fixed(quote.net_weight, NET_WEIGHT_DECIMALS));
            println!("gold: {}", quote.gold_cost);
            println!("diamond: {}", quote.diamond_cost);
            println!("labour: {}", quote.labour_cost);
            println!("price: {}", quote.total);
            println!("price_inr: {}", quote.total_money());

            Ok(())
        }
    }
}

//! Pricing Config

use clap::Args;
use karat::pricing::PricingRates;
use rust_decimal::Decimal;

/// Rates used to derive prices from weights.
#[derive(Debug, Clone, Args)]
pub struct PricingConfig {
    /// Gold rate per gram
    #[arg(long, env = "GOLD_RATE", default_value = "5050")]
    pub gold_rate: Decimal,

    /// Diamond rate per carat
    #[arg(long, env = "DIAMOND_RATE", default_value = "78000")]
    pub diamond_rate: Decimal,
}

impl PricingConfig {
    /// Rates for the price formula.
    #[must_use]
    pub fn rates(&self) -> PricingRates {
        PricingRates::new(self.gold_rate, self.diamond_rate)
    }
}

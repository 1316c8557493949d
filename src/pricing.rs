//! Pricing
//!
//! Derives a suggested retail price from the gold and diamond content of a
//! piece plus a per-gram labour charge.

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso};

/// Grams deducted from the gross weight for each carat of set diamonds.
pub const DIAMOND_GRAMS_PER_CARAT: Decimal = Decimal::from_parts(200, 0, 0, false, 3);

/// Labour charged per gram of gross weight.
pub const LABOUR_RATE: Decimal = Decimal::from_parts(1400, 0, 0, false, 0);

/// Reference gold rate used until staff enter the day's rate.
pub const DEFAULT_GOLD_RATE: Decimal = Decimal::from_parts(5050, 0, 0, false, 0);

/// Reference diamond rate (per carat) used until staff enter the day's rate.
pub const DEFAULT_DIAMOND_RATE: Decimal = Decimal::from_parts(78000, 0, 0, false, 0);

/// Decimal places kept on stored and displayed prices.
pub const PRICE_DECIMALS: u32 = 2;

/// Decimal places shown for net weight on labels.
pub const NET_WEIGHT_DECIMALS: u32 = 3;

/// Rates feeding the price formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingRates {
    /// Currency per gram of net gold.
    pub gold_rate: Decimal,

    /// Currency per carat of diamond.
    pub diamond_rate: Decimal,

    /// Currency per gram of gross weight.
    pub labour_rate: Decimal,
}

impl Default for PricingRates {
    fn default() -> Self {
        Self::new(DEFAULT_GOLD_RATE, DEFAULT_DIAMOND_RATE)
    }
}

impl PricingRates {
    /// Rates with the fixed labour charge.
    pub fn new(gold_rate: Decimal, diamond_rate: Decimal) -> Self {
        Self {
            gold_rate,
            diamond_rate,
            labour_rate: LABOUR_RATE,
        }
    }

    /// Copy of these rates with a new gold rate.
    #[must_use]
    pub fn with_gold_rate(self, gold_rate: Decimal) -> Self {
        Self { gold_rate, ..self }
    }

    /// Copy of these rates with a new diamond rate.
    #[must_use]
    pub fn with_diamond_rate(self, diamond_rate: Decimal) -> Self {
        Self {
            diamond_rate,
            ..self
        }
    }

    /// Price a piece from its gross weight (grams) and diamond weight (carats).
    pub fn quote(&self, gross_weight: Decimal, diamond_weight: Decimal) -> PriceQuote {
        let net_weight = net_weight(gross_weight, diamond_weight);
        let diamond_cost = diamond_weight * self.diamond_rate;
        let gold_cost = net_weight * self.gold_rate;
        let labour_cost = self.labour_rate * gross_weight;

        PriceQuote {
            net_weight,
            diamond_cost,
            gold_cost,
            labour_cost,
            total: fixed(diamond_cost + gold_cost + labour_cost, PRICE_DECIMALS),
        }
    }
}

/// Breakdown of a computed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    /// Gross weight less the diamond deduction, in grams.
    pub net_weight: Decimal,

    /// Diamond weight times the diamond rate.
    pub diamond_cost: Decimal,

    /// Net weight times the gold rate.
    pub gold_cost: Decimal,

    /// Labour rate times the gross weight.
    pub labour_cost: Decimal,

    /// Sum of the three costs, rounded to [`PRICE_DECIMALS`].
    pub total: Decimal,
}

impl PriceQuote {
    /// Total as an INR amount.
    pub fn total_money(&self) -> Money<'static, iso::Currency> {
        Money::from_decimal(self.total, iso::INR)
    }
}

/// Gross weight less the mass attributed to set diamonds.
pub fn net_weight(gross_weight: Decimal, diamond_weight: Decimal) -> Decimal {
    gross_weight - diamond_weight * DIAMOND_GRAMS_PER_CARAT
}

/// Round half away from zero and pad to exactly `decimals` places.
pub fn fixed(value: Decimal, decimals: u32) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);

    rounded.rescale(decimals);

    rounded
}

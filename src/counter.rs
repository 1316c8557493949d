//! Counter
//!
//! Totals for the pieces selected for the physical display counter.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::products::Product;

/// Errors raised while totalling or printing the counter.
#[derive(Debug, Error)]
pub enum CounterError {
    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Writing the summary failed.
    #[error("failed to write counter summary")]
    Io(#[source] io::Error),
}

/// Selected pieces with their list and discounted totals.
#[derive(Debug, Clone)]
pub struct CounterSummary {
    products: Vec<Product>,
    subtotal: Money<'static, iso::Currency>,
    total: Money<'static, iso::Currency>,
}

impl CounterSummary {
    /// Pieces on the counter.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Sum of list prices.
    pub fn subtotal(&self) -> Money<'static, iso::Currency> {
        self.subtotal
    }

    /// Sum of discounted prices.
    pub fn total(&self) -> Money<'static, iso::Currency> {
        self.total
    }

    /// Difference between list and discounted totals.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn savings(&self) -> Result<Money<'static, iso::Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Print the counter as a table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns a [`CounterError`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), CounterError> {
        let mut builder = Builder::default();

        builder.push_record(["HSN", "Item", "Weight", "Price", "Discount", "Counter Price"]);

        for product in &self.products {
            builder.push_record([
                product.hsn.to_string(),
                product.name.clone(),
                format!("{}g", product.weight),
                rupees(product.price).to_string(),
                format!("{}%", product.discount),
                rupees(product.discounted_price()).to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..), Alignment::right());

        writeln!(out, "{table}").map_err(CounterError::Io)?;
        writeln!(out, "Subtotal: {}", self.subtotal).map_err(CounterError::Io)?;
        writeln!(out, "Savings:  {}", self.savings()?).map_err(CounterError::Io)?;
        writeln!(out, "Total:    {}", self.total).map_err(CounterError::Io)?;

        Ok(())
    }
}

/// Total the products flagged for the counter.
///
/// Unselected products are ignored; an empty selection totals to zero.
///
/// # Errors
///
/// Returns a [`MoneyError`] if money arithmetic fails.
pub fn counter_total(products: &[Product]) -> Result<CounterSummary, MoneyError> {
    let selected: Vec<Product> = products.iter().filter(|p| p.selected).cloned().collect();

    let zero = Money::from_minor(0, iso::INR);

    let subtotal = selected
        .iter()
        .try_fold(zero, |acc, product| acc.add(rupees(product.price)))?;

    let total = selected
        .iter()
        .try_fold(zero, |acc, product| acc.add(rupees(product.discounted_price())))?;

    Ok(CounterSummary {
        products: selected,
        subtotal,
        total,
    })
}

fn rupees(amount: Decimal) -> Money<'static, iso::Currency> {
    Money::from_decimal(amount, iso::INR)
}

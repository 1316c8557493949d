//! Forms
//!
//! Product entry and edit forms as plain values. Each user action is a
//! [`FormEvent`] that turns one form state into the next; nothing here talks
//! to the backend.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{hsn::HsnError, photos::PhotoCodeError};

mod edit;
mod product;

pub use edit::{EditEvent, EditField, EditForm};
pub use product::{FormEvent, ProductForm};

/// A field on the product forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Product name.
    Name,
    /// List price.
    Price,
    /// Gross weight.
    Weight,
    /// Diamond weight.
    DiamondWeight,
    /// Category.
    Category,
    /// Collection name.
    CollectionName,
    /// Material.
    Material,
    /// Size.
    Size,
    /// Description.
    Description,
    /// Gold purity.
    Kt,
    /// Diamond clarity.
    Sihi,
    /// Discount percent.
    Discount,
    /// HSN code.
    Hsn,
    /// Photo code from the capture flow.
    PhotoCode,
}

impl FormField {
    /// Human readable name used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Product name",
            FormField::Price => "Price",
            FormField::Weight => "Weight",
            FormField::DiamondWeight => "Diamond weight",
            FormField::Category => "Category",
            FormField::CollectionName => "Collection name",
            FormField::Material => "Material",
            FormField::Size => "Size",
            FormField::Description => "Description",
            FormField::Kt => "KT",
            FormField::Sihi => "Sihi",
            FormField::Discount => "Discount",
            FormField::Hsn => "HSN code",
            FormField::PhotoCode => "Photo code",
        }
    }
}

impl Display for FormField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised while turning a form into stored data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field was blank.
    #[error("{0} is required")]
    Required(FormField),

    /// A numeric field did not hold a number.
    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber {
        /// Offending field.
        field: FormField,
        /// Raw value.
        value: String,
    },

    /// The price was below zero.
    #[error("Price cannot be negative")]
    NegativePrice,

    /// The discount was outside 0 to 100 percent.
    #[error("Discount must be between 0 and 100, got {0}")]
    DiscountOutOfRange(Decimal),

    /// Wrapped HSN error.
    #[error(transparent)]
    Hsn(#[from] HsnError),

    /// Wrapped photo code error.
    #[error(transparent)]
    PhotoCode(#[from] PhotoCodeError),
}

fn required(field: FormField, value: &str) -> Result<String, FormError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(FormError::Required(field));
    }

    Ok(value.to_string())
}

fn number(field: FormField, value: &str) -> Result<Decimal, FormError> {
    let value = value.trim();

    match Decimal::from_str(value) {
        Ok(number) => Ok(number),
        Err(_) => Err(FormError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

fn required_number(field: FormField, value: &str) -> Result<Decimal, FormError> {
    number(field, &required(field, value)?)
}

/// Blank values count as zero.
fn number_or_zero(field: FormField, value: &str) -> Result<Decimal, FormError> {
    if value.trim().is_empty() {
        Ok(Decimal::ZERO)
    } else {
        number(field, value)
    }
}

fn optional_number(field: FormField, value: &str) -> Result<Option<Decimal>, FormError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        number(field, value).map(Some)
    }
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();

    (!value.is_empty()).then(|| value.to_string())
}

fn price(value: &str) -> Result<Decimal, FormError> {
    let price = required_number(FormField::Price, value)?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(FormError::NegativePrice);
    }

    Ok(price)
}

/// Blank counts as no discount.
fn discount(value: &str) -> Result<Decimal, FormError> {
    let discount = number_or_zero(FormField::Discount, value)?;

    if discount < Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
        return Err(FormError::DiscountOutOfRange(discount));
    }

    Ok(discount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_fields_are_named() {
        assert_eq!(
            required(FormField::Size, "  "),
            Err(FormError::Required(FormField::Size))
        );
        assert_eq!(
            FormError::Required(FormField::Name).to_string(),
            "Product name is required"
        );
    }

    #[test]
    fn blank_numbers_can_default_to_zero() {
        assert_eq!(number_or_zero(FormField::Discount, ""), Ok(Decimal::ZERO));
        assert!(number_or_zero(FormField::Discount, "ten").is_err());
    }

    #[test]
    fn discounts_stay_within_a_percent() {
        assert_eq!(discount(""), Ok(Decimal::ZERO));
        assert_eq!(discount("100"), Ok(Decimal::ONE_HUNDRED));
        assert_eq!(
            discount("150"),
            Err(FormError::DiscountOutOfRange(Decimal::from(150)))
        );
        assert_eq!(
            discount("-5"),
            Err(FormError::DiscountOutOfRange(Decimal::from(-5)))
        );
    }

    #[test]
    fn negative_prices_are_rejected() {
        assert_eq!(price("-1"), Err(FormError::NegativePrice));
        assert_eq!(price("0"), Ok(Decimal::ZERO));
    }
}

//! Products

use std::{
    convert::Infallible,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    hsn::HsnCode,
    pricing::{NET_WEIGHT_DECIMALS, PRICE_DECIMALS, fixed, net_weight},
};

/// Row id assigned by the product store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a raw row id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw row id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse().map(Self)
    }
}

/// Kind of jewelry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Ring
    Ring,
    /// Bracelet
    Bracelet,
    /// Chains
    Chains,
    /// Necklace
    Necklace,
    /// Necklace set
    NecklaceSet,
    /// Earring
    Earring,
    /// Bangles
    Bangles,
    /// Anklet
    Anklet,
    /// Studs
    Studs,
    /// Pendant set
    PendantSet,
    /// Chain pendant
    ChainPendant,
    /// Chain pendant set
    ChainPendantSet,
    /// Hoops
    Hoops,
    /// Pendant
    Pendant,
    /// A value outside the known list, kept verbatim.
    Other(String),
}

impl Category {
    /// Every known category, in menu order.
    pub const ALL: [Category; 14] = [
        Category::Ring,
        Category::Bracelet,
        Category::Chains,
        Category::Necklace,
        Category::NecklaceSet,
        Category::Earring,
        Category::Bangles,
        Category::Anklet,
        Category::Studs,
        Category::PendantSet,
        Category::ChainPendant,
        Category::ChainPendantSet,
        Category::Hoops,
        Category::Pendant,
    ];

    /// Stored value of the category.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Ring => "ring",
            Category::Bracelet => "bracelet",
            Category::Chains => "chains",
            Category::Necklace => "necklace",
            Category::NecklaceSet => "necklace set",
            Category::Earring => "earring",
            Category::Bangles => "bangles",
            Category::Anklet => "anklet",
            Category::Studs => "studs",
            Category::PendantSet => "pendant set",
            Category::ChainPendant => "chain pendant",
            Category::ChainPendantSet => "chain pendant set",
            Category::Hoops => "hoops",
            Category::Pendant => "pendant",
            Category::Other(other) => other,
        }
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let known = Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()));

        Ok(known.unwrap_or_else(|| Category::Other(value.to_string())))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Row id.
    pub id: ProductId,

    /// Unique HSN code.
    pub hsn: HsnCode,

    /// Display name.
    pub name: String,

    /// Kind of jewelry.
    pub category: Category,

    /// Collection the piece belongs to.
    pub collection_name: String,

    /// Metal or material description.
    pub material: String,

    /// Ring size, length, or `universal`.
    pub size: String,

    /// Free-form description.
    pub description: String,

    /// Gross weight in grams.
    pub weight: Decimal,

    /// Set diamond weight in carats.
    pub diamond_weight: Option<Decimal>,

    /// Gold purity in karats, recorded alongside diamonds.
    pub kt: Option<String>,

    /// Diamond clarity grade code.
    pub sihi: Option<String>,

    /// List price.
    pub price: Decimal,

    /// Discount in percent points.
    pub discount: Decimal,

    /// Object path of the stock photo.
    pub stock_photo: Option<String>,

    /// Selected for the display counter.
    pub selected: bool,
}

impl Product {
    /// Whether the piece carries set diamonds.
    pub fn has_diamonds(&self) -> bool {
        self.diamond_weight.is_some()
    }

    /// Gross weight less the diamond deduction, rounded for display.
    pub fn net_weight(&self) -> Decimal {
        fixed(
            net_weight(self.weight, self.diamond_weight.unwrap_or_default()),
            NET_WEIGHT_DECIMALS,
        )
    }

    /// List price less the discount.
    pub fn discounted_price(&self) -> Decimal {
        if self.discount.is_zero() {
            return self.price;
        }

        let discount = Percentage::from(self.discount / Decimal::ONE_HUNDRED);

        fixed(self.price - discount * self.price, PRICE_DECIMALS)
    }
}

/// Data for a product that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Unique HSN code.
    pub hsn: HsnCode,

    /// Display name.
    pub name: String,

    /// Kind of jewelry.
    pub category: Category,

    /// Collection the piece belongs to.
    pub collection_name: String,

    /// Metal or material description.
    pub material: String,

    /// Ring size, length, or `universal`.
    pub size: String,

    /// Free-form description.
    pub description: String,

    /// Gross weight in grams.
    pub weight: Decimal,

    /// Set diamond weight in carats.
    pub diamond_weight: Option<Decimal>,

    /// Gold purity in karats.
    pub kt: Option<String>,

    /// Diamond clarity grade code.
    pub sihi: Option<String>,

    /// List price.
    pub price: Decimal,

    /// Discount in percent points.
    pub discount: Decimal,

    /// Object path of the stock photo, filled in once the photo is resolved.
    pub stock_photo: Option<String>,
}

/// Changes saved from the edit page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    /// Display name.
    pub name: String,

    /// List price.
    pub price: Decimal,

    /// Ring size, length, or `universal`.
    pub size: String,

    /// Kind of jewelry.
    pub category: Category,

    /// Free-form description.
    pub description: String,

    /// Discount in percent points.
    pub discount: Decimal,

    /// Replacement photo path; `None` keeps the stored photo.
    pub stock_photo: Option<String>,
}


#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::{fixtures::gold_ring, *};

    #[test]
    fn categories_round_trip_through_strings() -> TestResult {
        let category: Category = "Chain Pendant Set".parse()?;

        assert_eq!(category, Category::ChainPendantSet);
        assert_eq!(String::from(category), "chain pendant set");

        Ok(())
    }

    #[test]
    fn unknown_categories_are_kept() -> TestResult {
        let category: Category = "Clothing".parse()?;

        assert_eq!(category, Category::Other("Clothing".to_string()));
        assert_eq!(category.to_string(), "Clothing");

        Ok(())
    }

    #[test]
    fn net_weight_uses_diamond_deduction() {
        let product = Product {
            diamond_weight: Some(Decimal::from(2)),
            ..gold_ring()
        };

        assert_eq!(product.net_weight().to_string(), "9.600");
    }

    #[test]
    fn discounted_price_applies_percent_points() {
        let product = Product {
            price: Decimal::from(1000),
            discount: Decimal::from(15),
            ..gold_ring()
        };

        assert_eq!(product.discounted_price().to_string(), "850.00");
    }

    #[test]
    fn zero_discount_keeps_price() {
        let product = gold_ring();

        assert_eq!(product.discounted_price(), product.price);
    }
}

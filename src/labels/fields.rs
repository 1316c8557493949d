//! Label fields

use std::fmt::{self, Display, Formatter};

use smallvec::SmallVec;

use crate::{labels::errors::LabelError, products::Product};

/// Fields a label can be missing or mistyped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelField {
    /// Product name.
    Name,
    /// List price.
    Price,
    /// Gross weight.
    Weight,
    /// HSN code.
    Hsn,
    /// Diamond weight.
    DiamondWeight,
}

impl LabelField {
    /// Human readable name used in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            LabelField::Name => "Name",
            LabelField::Price => "Price",
            LabelField::Weight => "Weight",
            LabelField::Hsn => "HSN code",
            LabelField::DiamondWeight => "Diamond weight",
        }
    }
}

impl Display for LabelField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Text printed on a label, as entered or as stored.
///
/// Values are kept as strings so a label shows exactly what staff typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelFields {
    /// Product name, wrapped across the top of the label.
    pub name: String,

    /// List price.
    pub price: String,

    /// Gross weight in grams.
    pub weight: String,

    /// HSN code.
    pub hsn: String,

    /// Collection name, shown on plain gold labels.
    pub collection_name: String,

    /// Size or the `universal` sentinel.
    pub size: String,

    /// Diamond weight in carats; blank for plain gold.
    pub diamond_weight: String,

    /// Gold purity in karats.
    pub kt: String,

    /// Diamond clarity grade.
    pub sihi: String,
}

impl LabelFields {
    /// Whether the diamond block should be printed.
    pub fn has_diamonds(&self) -> bool {
        !self.diamond_weight.trim().is_empty()
    }

    /// Check that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::MissingFields`] naming every blank field.
    pub fn validate(&self) -> Result<(), LabelError> {
        let required = [
            (LabelField::Name, &self.name),
            (LabelField::Price, &self.price),
            (LabelField::Weight, &self.weight),
            (LabelField::Hsn, &self.hsn),
        ];

        let missing: SmallVec<[LabelField; 4]> = required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(LabelError::MissingFields(missing))
        }
    }
}

impl From<&Product> for LabelFields {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            weight: product.weight.to_string(),
            hsn: product.hsn.to_string(),
            collection_name: product.collection_name.clone(),
            size: product.size.clone(),
            diamond_weight: product
                .diamond_weight
                .map(|weight| weight.to_string())
                .unwrap_or_default(),
            kt: product.kt.clone().unwrap_or_default(),
            sihi: product.sihi.clone().unwrap_or_default(),
        }
    }
}

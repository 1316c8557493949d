//! Product Records

use karat::{
    hsn::{HSN_DIGITS, HsnCode, HsnError},
    products::{Category, NewProduct, Product, ProductId, ProductUpdate},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Table holding products.
pub const PRODUCTS_TABLE: &str = "products";

/// Product row as returned by the row store.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    #[serde(default, deserialize_with = "raw_hsn")]
    pub hsn: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub weight: Decimal,
    #[serde(default)]
    pub diamond_weight: Option<Decimal>,
    #[serde(default)]
    pub kt: Option<String>,
    #[serde(default)]
    pub sihi: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub stock_photo: Option<String>,
    #[serde(default)]
    pub selected: Option<bool>,
}

/// HSN column as stored, without validation.
///
/// Rows written by other tools may hold blank or short codes, or keep the
/// code in a numeric column.
fn raw_hsn<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => text,
        Some(Raw::Number(number)) => format!("{number:0width$}", width = HSN_DIGITS),
        None => String::new(),
    })
}

impl TryFrom<ProductRecord> for Product {
    type Error = HsnError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            hsn: record.hsn.parse()?,
            name: record.name,
            category: Category::from(record.category.unwrap_or_default()),
            collection_name: record.collection_name.unwrap_or_default(),
            material: record.material.unwrap_or_default(),
            size: record.size.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            weight: record.weight,
            diamond_weight: record.diamond_weight,
            kt: record.kt.filter(|kt| !kt.is_empty()),
            sihi: record.sihi.filter(|sihi| !sihi.is_empty()),
            price: record.price,
            discount: record.discount.unwrap_or_default(),
            stock_photo: record.stock_photo.filter(|path| !path.is_empty()),
            selected: record.selected.unwrap_or_default(),
        })
    }
}

/// Convert fetched rows, skipping any whose HSN code does not parse.
pub fn products_from(records: Vec<ProductRecord>) -> Vec<Product> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.id;
            let hsn = record.hsn.clone();

            match Product::try_from(record) {
                Ok(product) => Some(product),
                Err(error) => {
                    warn!(%id, %hsn, %error, "skipping product with an invalid HSN code");
                    None
                }
            }
        })
        .collect()
}

/// Row inserted for a new product.
#[derive(Debug, Serialize)]
pub struct NewProductRecord<'a> {
    pub hsn: &'a HsnCode,
    pub name: &'a str,
    pub category: &'a Category,
    pub collection_name: &'a str,
    pub material: &'a str,
    pub size: &'a str,
    pub description: &'a str,
    pub weight: Decimal,
    pub diamond_weight: Option<Decimal>,
    pub kt: Option<&'a str>,
    pub sihi: Option<&'a str>,
    pub price: Decimal,
    pub discount: Decimal,
    pub stock_photo: Option<&'a str>,
}

impl<'a> From<&'a NewProduct> for NewProductRecord<'a> {
    fn from(product: &'a NewProduct) -> Self {
        Self {
            hsn: &product.hsn,
            name: &product.name,
            category: &product.category,
            collection_name: &product.collection_name,
            material: &product.material,
            size: &product.size,
            description: &product.description,
            weight: product.weight,
            diamond_weight: product.diamond_weight,
            kt: product.kt.as_deref(),
            sihi: product.sihi.as_deref(),
            price: product.price,
            discount: product.discount,
            stock_photo: product.stock_photo.as_deref(),
        }
    }
}

/// Columns written by the edit page.
#[derive(Debug, Serialize)]
pub struct ProductUpdateRecord<'a> {
    pub name: &'a str,
    pub price: Decimal,
    pub size: &'a str,
    pub category: &'a Category,
    pub description: &'a str,
    pub discount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_photo: Option<&'a str>,
}

impl<'a> From<&'a ProductUpdate> for ProductUpdateRecord<'a> {
    fn from(update: &'a ProductUpdate) -> Self {
        Self {
            name: &update.name,
            price: update.price,
            size: &update.size,
            category: &update.category,
            description: &update.description,
            discount: update.discount,
            stock_photo: update.stock_photo.as_deref(),
        }
    }
}

/// Counter selection flag.
#[derive(Debug, Serialize)]
pub struct SelectionRecord {
    pub selected: bool,
}

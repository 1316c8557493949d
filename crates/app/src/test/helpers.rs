//! Test Helpers

use karat::{
    forms::{FormEvent, FormField, ProductForm},
    products::{Category, Product, ProductId},
};
use rust_decimal::Decimal;

/// A stored plain gold ring priced at 64500.
pub(crate) fn stored(id: i64, hsn: &str) -> Product {
    Product {
        id: ProductId::new(id),
        hsn: hsn.parse().expect("valid HSN code"),
        name: "gold ring".to_string(),
        category: Category::Ring,
        collection_name: "bridal".to_string(),
        material: "gold".to_string(),
        size: "12".to_string(),
        description: String::new(),
        weight: Decimal::from(10),
        diamond_weight: None,
        kt: None,
        sihi: None,
        price: Decimal::from(64_500),
        discount: Decimal::ZERO,
        stock_photo: None,
        selected: false,
    }
}

/// Entry form with every required field filled in.
pub(crate) fn filled_form() -> ProductForm {
    [
        (FormField::Name, "gold ring"),
        (FormField::Price, "64500"),
        (FormField::Weight, "10"),
        (FormField::Category, "ring"),
        (FormField::Size, "12"),
        (FormField::Hsn, "12345678"),
    ]
    .into_iter()
    .fold(ProductForm::default(), |form, (field, value)| {
        form.apply(FormEvent::FieldChanged(field, value.to_string()))
    })
}

//! Product edit form

use crate::{
    forms::{FormError, FormField, discount, price, required},
    photos::PhotoUpload,
    products::{Category, Product, ProductUpdate},
};

/// Fields that can be changed once a product is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditField {
    /// Product name.
    Name,
    /// List price.
    Price,
    /// Size.
    Size,
    /// Category.
    Category,
    /// Description.
    Description,
    /// Discount percent.
    Discount,
}

impl From<EditField> for FormField {
    fn from(field: EditField) -> Self {
        match field {
            EditField::Name => FormField::Name,
            EditField::Price => FormField::Price,
            EditField::Size => FormField::Size,
            EditField::Category => FormField::Category,
            EditField::Description => FormField::Description,
            EditField::Discount => FormField::Discount,
        }
    }
}

/// Something the user did on the edit form.
#[derive(Debug, Clone, PartialEq)]
pub enum EditEvent {
    /// A text field was edited.
    FieldChanged(EditField, String),

    /// A replacement photo was picked.
    PhotoSelected(PhotoUpload),
}

/// State of the edit form for one stored product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditForm {
    name: String,
    price: String,
    size: String,
    category: String,
    description: String,
    discount: String,
    photo: Option<PhotoUpload>,
}

impl EditForm {
    /// Load the editable fields of `product`.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            size: product.size.clone(),
            category: product.category.to_string(),
            description: product.description.clone(),
            discount: product.discount.to_string(),
            photo: None,
        }
    }

    /// Move to the next state.
    #[must_use]
    pub fn apply(self, event: EditEvent) -> Self {
        match event {
            EditEvent::FieldChanged(field, value) => match field {
                EditField::Name => Self { name: value, ..self },
                EditField::Price => Self {
                    price: value,
                    ..self
                },
                EditField::Size => Self { size: value, ..self },
                EditField::Category => Self {
                    category: value,
                    ..self
                },
                EditField::Description => Self {
                    description: value,
                    ..self
                },
                EditField::Discount => Self {
                    discount: value,
                    ..self
                },
            },
            EditEvent::PhotoSelected(upload) => Self {
                photo: Some(upload),
                ..self
            },
        }
    }

    /// Raw value of a field.
    pub fn value(&self, field: EditField) -> &str {
        match field {
            EditField::Name => &self.name,
            EditField::Price => &self.price,
            EditField::Size => &self.size,
            EditField::Category => &self.category,
            EditField::Description => &self.description,
            EditField::Discount => &self.discount,
        }
    }

    /// Replacement photo, if one was picked.
    pub fn photo(&self) -> Option<&PhotoUpload> {
        self.photo.as_ref()
    }

    /// Validate and parse the form into an update.
    ///
    /// The update keeps the stored photo; a replacement path is filled in
    /// once the new file has been uploaded.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] naming the first field that is missing or
    /// malformed.
    pub fn to_update(&self) -> Result<ProductUpdate, FormError> {
        let name = required(FormField::Name, &self.name)?;
        let price = price(&self.price)?;
        let size = required(FormField::Size, &self.size)?;
        let category: Category = match required(FormField::Category, &self.category)?.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        };
        let discount = discount(&self.discount)?;

        Ok(ProductUpdate {
            name,
            price,
            size,
            category,
            description: self.description.trim().to_string(),
            discount,
            stock_photo: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::products::fixtures::gold_ring;

    use super::*;

    #[test]
    fn loads_the_stored_values() {
        let form = EditForm::from_product(&gold_ring());

        assert_eq!(form.value(EditField::Name), "gold ring");
        assert_eq!(form.value(EditField::Price), "64500.00");
        assert_eq!(form.value(EditField::Category), "ring");
        assert!(form.photo().is_none());
    }

    #[test]
    fn unchanged_form_round_trips_to_an_update() -> TestResult {
        let product = gold_ring();
        let update = EditForm::from_product(&product).to_update()?;

        assert_eq!(update.name, product.name);
        assert_eq!(update.price, product.price);
        assert_eq!(update.category, product.category);
        assert_eq!(update.stock_photo, None);

        Ok(())
    }

    #[test]
    fn edits_are_applied() -> TestResult {
        let update = EditForm::from_product(&gold_ring())
            .apply(EditEvent::FieldChanged(EditField::Discount, "12.5".into()))
            .apply(EditEvent::FieldChanged(EditField::Category, "Pendant".into()))
            .to_update()?;

        assert_eq!(update.discount, Decimal::new(125, 1));
        assert_eq!(update.category, Category::Pendant);

        Ok(())
    }

    #[test]
    fn discounts_over_a_hundred_percent_are_rejected() {
        let form = EditForm::from_product(&gold_ring())
            .apply(EditEvent::FieldChanged(EditField::Discount, "120".into()));

        assert_eq!(
            form.to_update(),
            Err(FormError::DiscountOutOfRange(Decimal::from(120)))
        );
    }

    #[test]
    fn size_is_required_when_editing() {
        let form = EditForm::from_product(&gold_ring())
            .apply(EditEvent::FieldChanged(EditField::Size, String::new()));

        assert_eq!(form.to_update(), Err(FormError::Required(FormField::Size)));
    }

    #[test]
    fn replacement_photo_is_kept() {
        let form = EditForm::from_product(&gold_ring())
            .apply(EditEvent::PhotoSelected(PhotoUpload::new("new.png", vec![7])));

        assert_eq!(form.photo().map(|photo| photo.content_type.as_str()), Some("image/png"));
    }
}

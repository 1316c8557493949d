//! Product entry form

use rust_decimal::Decimal;
use tracing::warn;

use crate::{
    forms::{
        FormError, FormField, discount, number_or_zero, optional_number, optional_text, price,
        required, required_number,
    },
    hsn::HsnCode,
    labels::LabelFields,
    photos::{PhotoCode, PhotoSource, PhotoUpload},
    pricing::{PRICE_DECIMALS, PricingRates, fixed},
    products::{Category, NewProduct},
};

/// Something the user did on the entry form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// A text field was edited.
    FieldChanged(FormField, String),

    /// A photo file was picked.
    PhotoSelected(PhotoUpload),

    /// The day's gold rate was changed.
    GoldRateChanged(Decimal),

    /// The day's diamond rate was changed.
    DiamondRateChanged(Decimal),

    /// A fresh HSN code was generated.
    HsnGenerated(HsnCode),

    /// The product was saved.
    Submitted,
}

/// State of the product entry form.
///
/// Values are kept exactly as typed; [`ProductForm::to_new_product`] does the
/// parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    name: String,
    price: String,
    weight: String,
    diamond_weight: String,
    category: String,
    collection_name: String,
    material: String,
    size: String,
    description: String,
    kt: String,
    sihi: String,
    discount: String,
    hsn: String,
    photo_code: String,
    photo: Option<PhotoUpload>,
    rates: PricingRates,
}

impl ProductForm {
    /// Empty form priced with `rates`.
    pub fn new(rates: PricingRates) -> Self {
        Self {
            rates,
            ..Self::default()
        }
    }

    /// Move to the next state.
    ///
    /// Only a usable diamond weight entry reprices the piece; editing the
    /// gross weight or the rates leaves the price as it is.
    #[must_use]
    pub fn apply(self, event: FormEvent) -> Self {
        match event {
            FormEvent::FieldChanged(FormField::DiamondWeight, value) => {
                let price = self
                    .derived_price(&value)
                    .unwrap_or_else(|| self.price.clone());

                Self {
                    diamond_weight: value,
                    price,
                    ..self
                }
            }
            FormEvent::FieldChanged(field, value) => self.with_field(field, value),
            FormEvent::PhotoSelected(upload) => Self {
                photo: Some(upload),
                ..self
            },
            FormEvent::GoldRateChanged(rate) => Self {
                rates: self.rates.with_gold_rate(rate),
                ..self
            },
            FormEvent::DiamondRateChanged(rate) => Self {
                rates: self.rates.with_diamond_rate(rate),
                ..self
            },
            FormEvent::HsnGenerated(hsn) => Self {
                hsn: hsn.to_string(),
                ..self
            },
            FormEvent::Submitted => {
                let hsn = self
                    .hsn
                    .parse::<HsnCode>()
                    .ok()
                    .and_then(|hsn| hsn.next())
                    .map(|hsn| hsn.to_string())
                    .unwrap_or_default();

                Self {
                    name: String::new(),
                    price: String::new(),
                    weight: String::new(),
                    diamond_weight: String::new(),
                    photo_code: String::new(),
                    photo: None,
                    hsn,
                    ..self
                }
            }
        }
    }

    fn with_field(self, field: FormField, value: String) -> Self {
        match field {
            FormField::Name => Self { name: value, ..self },
            FormField::Price => Self {
                price: value,
                ..self
            },
            FormField::Weight => Self {
                weight: value,
                ..self
            },
            FormField::DiamondWeight => Self {
                diamond_weight: value,
                ..self
            },
            FormField::Category => Self {
                category: value,
                ..self
            },
            FormField::CollectionName => Self {
                collection_name: value,
                ..self
            },
            FormField::Material => Self {
                material: value,
                ..self
            },
            FormField::Size => Self { size: value, ..self },
            FormField::Description => Self {
                description: value,
                ..self
            },
            FormField::Kt => Self { kt: value, ..self },
            FormField::Sihi => Self { sihi: value, ..self },
            FormField::Discount => Self {
                discount: value,
                ..self
            },
            FormField::Hsn => Self { hsn: value, ..self },
            FormField::PhotoCode => Self {
                photo_code: value,
                ..self
            },
        }
    }

    /// Price for a newly entered diamond weight, if both weights are usable.
    fn derived_price(&self, diamond_weight: &str) -> Option<String> {
        let diamond_weight = diamond_weight.trim();

        if diamond_weight.is_empty() {
            return None;
        }

        let diamond_weight = diamond_weight.parse::<Decimal>().ok()?;
        let gross_weight = number_or_zero(FormField::Weight, &self.weight).ok()?;
        let quote = self.rates.quote(gross_weight, diamond_weight);

        Some(fixed(quote.total, PRICE_DECIMALS).to_string())
    }

    /// Raw value of a field.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Price => &self.price,
            FormField::Weight => &self.weight,
            FormField::DiamondWeight => &self.diamond_weight,
            FormField::Category => &self.category,
            FormField::CollectionName => &self.collection_name,
            FormField::Material => &self.material,
            FormField::Size => &self.size,
            FormField::Description => &self.description,
            FormField::Kt => &self.kt,
            FormField::Sihi => &self.sihi,
            FormField::Discount => &self.discount,
            FormField::Hsn => &self.hsn,
            FormField::PhotoCode => &self.photo_code,
        }
    }

    /// Picked photo file, if any.
    pub fn photo(&self) -> Option<&PhotoUpload> {
        self.photo.as_ref()
    }

    /// Rates used for price derivation.
    pub fn rates(&self) -> PricingRates {
        self.rates
    }

    /// Parsed photo code, or `None` when the field is blank.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::PhotoCode`] if the code is not four digits.
    pub fn photo_code(&self) -> Result<Option<PhotoCode>, FormError> {
        if self.photo_code.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(self.photo_code.parse()?))
    }

    /// Where the stock photo should come from. A picked file wins over a code.
    pub fn photo_source<'a>(&'a self, code: Option<&'a PhotoCode>) -> PhotoSource<'a> {
        match (&self.photo, code) {
            (Some(upload), _) => PhotoSource::Upload(upload),
            (None, Some(code)) => PhotoSource::Code(code),
            (None, None) => PhotoSource::None,
        }
    }

    /// Validate and parse the form into a product ready to store.
    ///
    /// The stock photo is left unset; it is resolved separately.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] naming the first field that is missing or
    /// malformed.
    pub fn to_new_product(&self) -> Result<NewProduct, FormError> {
        let name = required(FormField::Name, &self.name)?;
        let price = price(&self.price)?;
        let weight = required_number(FormField::Weight, &self.weight)?;
        let category: Category = match required(FormField::Category, &self.category)?.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        };
        let size = required(FormField::Size, &self.size)?;
        let hsn: HsnCode = self.hsn.parse()?;
        let diamond_weight = optional_number(FormField::DiamondWeight, &self.diamond_weight)?;
        let discount = discount(&self.discount)?;
        let kt = optional_text(&self.kt);
        let sihi = optional_text(&self.sihi);

        if diamond_weight.is_some() && (kt.is_none() || sihi.is_none()) {
            warn!(%hsn, "diamond piece saved without karat or clarity");
        }

        Ok(NewProduct {
            hsn,
            name,
            category,
            collection_name: self.collection_name.trim().to_string(),
            material: self.material.trim().to_string(),
            size,
            description: self.description.trim().to_string(),
            weight,
            diamond_weight,
            kt,
            sihi,
            price,
            discount,
            stock_photo: None,
        })
    }

    /// Fields for printing a label straight from the form.
    pub fn label_fields(&self) -> LabelFields {
        LabelFields {
            name: self.name.clone(),
            price: self.price.clone(),
            weight: self.weight.clone(),
            hsn: self.hsn.clone(),
            collection_name: self.collection_name.clone(),
            size: self.size.clone(),
            diamond_weight: self.diamond_weight.clone(),
            kt: self.kt.clone(),
            sihi: self.sihi.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn changed(form: ProductForm, field: FormField, value: &str) -> ProductForm {
        form.apply(FormEvent::FieldChanged(field, value.to_string()))
    }

    fn filled() -> ProductForm {
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
            changed(form, field, value)
        })
    }

    #[test]
    fn diamond_weight_derives_the_price() {
        let form = changed(ProductForm::default(), FormField::Weight, "10");
        let form = changed(form, FormField::DiamondWeight, "2");

        assert_eq!(form.value(FormField::Price), "218480.00");
        assert_eq!(form.value(FormField::DiamondWeight), "2");
    }

    #[test]
    fn blank_gross_weight_counts_as_zero() {
        let form = changed(ProductForm::default(), FormField::DiamondWeight, "1");

        // 1ct at 78000 less 0.2g of gold at 5050
        assert_eq!(form.value(FormField::Price), "76990.00");
    }

    #[test]
    fn other_fields_leave_the_price_alone() {
        let form = changed(ProductForm::default(), FormField::Price, "999");
        let form = changed(form, FormField::Weight, "12");
        let form = form.apply(FormEvent::GoldRateChanged(Decimal::from(6000)));

        assert_eq!(form.value(FormField::Price), "999");
    }

    #[test]
    fn blank_or_garbled_diamond_weight_keeps_the_price() {
        let form = changed(ProductForm::default(), FormField::Price, "999");
        let form = changed(form, FormField::DiamondWeight, "");

        assert_eq!(form.value(FormField::Price), "999");

        let form = changed(form, FormField::DiamondWeight, "abc");

        assert_eq!(form.value(FormField::Price), "999");
        assert_eq!(form.value(FormField::DiamondWeight), "abc");
    }

    #[test]
    fn rates_feed_later_derivations() {
        let form = ProductForm::default()
            .apply(FormEvent::GoldRateChanged(Decimal::from(6000)))
            .apply(FormEvent::DiamondRateChanged(Decimal::from(50000)));
        let form = changed(form, FormField::Weight, "10");
        let form = changed(form, FormField::DiamondWeight, "1");

        // 50000 + 9.8 * 6000 + 14000
        assert_eq!(form.value(FormField::Price), "122800.00");
    }

    #[test]
    fn submitting_clears_the_piece_and_advances_hsn() {
        let form = changed(filled(), FormField::CollectionName, "bridal")
            .apply(FormEvent::PhotoSelected(PhotoUpload::new("a.jpg", vec![1])));
        let form = changed(form, FormField::PhotoCode, "1234");

        let next = form.apply(FormEvent::Submitted);

        assert_eq!(next.value(FormField::Name), "");
        assert_eq!(next.value(FormField::Price), "");
        assert_eq!(next.value(FormField::Weight), "");
        assert_eq!(next.value(FormField::PhotoCode), "");
        assert!(next.photo().is_none());
        assert_eq!(next.value(FormField::Hsn), "12345679");
        assert_eq!(next.value(FormField::CollectionName), "bridal");
        assert_eq!(next.value(FormField::Category), "ring");
    }

    #[test]
    fn submitting_past_the_last_hsn_clears_it() {
        let form = changed(filled(), FormField::Hsn, "99999999").apply(FormEvent::Submitted);

        assert_eq!(form.value(FormField::Hsn), "");
    }

    #[test]
    fn generated_hsn_is_stored() -> TestResult {
        let form = ProductForm::default().apply(FormEvent::HsnGenerated("87654321".parse()?));

        assert_eq!(form.value(FormField::Hsn), "87654321");

        Ok(())
    }

    #[test]
    fn complete_form_becomes_a_new_product() -> TestResult {
        let product = changed(filled(), FormField::Discount, "5").to_new_product()?;

        assert_eq!(product.name, "gold ring");
        assert_eq!(product.category, Category::Ring);
        assert_eq!(product.price, Decimal::from(64500));
        assert_eq!(product.discount, Decimal::from(5));
        assert_eq!(product.diamond_weight, None);
        assert_eq!(product.hsn.as_str(), "12345678");

        Ok(())
    }

    #[test]
    fn negative_discounts_are_rejected() {
        let form = changed(filled(), FormField::Discount, "-10");

        assert_eq!(
            form.to_new_product(),
            Err(FormError::DiscountOutOfRange(Decimal::from(-10)))
        );
    }

    #[test]
    fn missing_required_fields_are_reported() {
        for field in [
            FormField::Name,
            FormField::Price,
            FormField::Weight,
            FormField::Category,
            FormField::Size,
        ] {
            let form = changed(filled(), field, " ");

            assert_eq!(form.to_new_product(), Err(FormError::Required(field)));
        }
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            changed(filled(), FormField::Weight, "ten").to_new_product(),
            Err(FormError::InvalidNumber {
                field: FormField::Weight,
                ..
            })
        ));
        assert_eq!(
            changed(filled(), FormField::Price, "-5").to_new_product(),
            Err(FormError::NegativePrice)
        );
        assert!(matches!(
            changed(filled(), FormField::Hsn, "1234").to_new_product(),
            Err(FormError::Hsn(_))
        ));
    }

    #[test]
    fn photo_code_must_be_four_digits() -> TestResult {
        assert_eq!(filled().photo_code()?, None);
        assert!(changed(filled(), FormField::PhotoCode, "12").photo_code().is_err());

        let code = changed(filled(), FormField::PhotoCode, "4321").photo_code()?;

        assert_eq!(code.map(|code| code.to_string()), Some("4321".to_string()));

        Ok(())
    }

    #[test]
    fn picked_file_wins_over_photo_code() -> TestResult {
        let form = changed(filled(), FormField::PhotoCode, "4321")
            .apply(FormEvent::PhotoSelected(PhotoUpload::new("a.jpg", vec![])));
        let code = form.photo_code()?;

        assert!(matches!(form.photo_source(code.as_ref()), PhotoSource::Upload(_)));

        Ok(())
    }

    #[test]
    fn label_fields_mirror_the_form() {
        let fields = changed(filled(), FormField::DiamondWeight, "0.5").label_fields();

        assert_eq!(fields.name, "gold ring");
        assert_eq!(fields.diamond_weight, "0.5");
        assert!(fields.has_diamonds());
    }
}

//! Prelude

pub use crate::{
    counter::{CounterError, CounterSummary, counter_total},
    forms::{EditEvent, EditField, EditForm, FormError, FormEvent, FormField, ProductForm},
    hsn::{HsnCode, HsnError},
    labels::{LabelError, LabelField, LabelFields, LabelFont, LabelLayout, LabelRenderer},
    photos::{PhotoCode, PhotoCodeError, PhotoSource, PhotoUpload},
    pricing::{PriceQuote, PricingRates},
    products::{Category, NewProduct, Product, ProductId, ProductUpdate},
};

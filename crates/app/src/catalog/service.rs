//! Catalog service.

use std::sync::Arc;

use jiff::Timestamp;
use karat::{
    counter::{CounterSummary, counter_total},
    forms::{EditForm, FormEvent, ProductForm},
    hsn::HsnCode,
    photos::{PhotoCode, PhotoSource, PhotoUpload},
    products::{Product, ProductId},
};
use tracing::{debug, info};

use crate::{
    catalog::{CatalogError, CatalogPage, ListRequest},
    config::catalog::CatalogConfig,
    domain::{image_codes::ImageCodesService, products::ProductsService, storage::StorageService},
};

/// Catalog workflow settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    pub max_hsn_attempts: u32,
    pub photo_bucket: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            max_hsn_attempts: 32,
            photo_bucket: "product-images".to_string(),
        }
    }
}

impl From<&CatalogConfig> for CatalogSettings {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            max_hsn_attempts: config.max_hsn_attempts,
            photo_bucket: config.photo_bucket.clone(),
        }
    }
}

#[derive(Clone)]
pub struct Catalog {
    products: Arc<dyn ProductsService>,
    image_codes: Arc<dyn ImageCodesService>,
    storage: Arc<dyn StorageService>,
    settings: CatalogSettings,
}

impl Catalog {
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        image_codes: Arc<dyn ImageCodesService>,
        storage: Arc<dyn StorageService>,
        settings: CatalogSettings,
    ) -> Self {
        Self {
            products,
            image_codes,
            storage,
            settings,
        }
    }

    /// Draw random codes until one is not used by any stored product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::HsnExhausted`] when every draw collides, or a
    /// store error.
    pub async fn generate_hsn(&self) -> Result<HsnCode, CatalogError> {
        let attempts = self.settings.max_hsn_attempts;

        for attempt in 1..=attempts {
            let hsn = HsnCode::random(&mut rand::thread_rng());

            if self.products.find_by_hsn(&hsn).await?.is_none() {
                debug!(%hsn, attempt, "generated HSN code");

                return Ok(hsn);
            }

            debug!(%hsn, attempt, "generated HSN code already in use");
        }

        Err(CatalogError::HsnExhausted { attempts })
    }

    /// Save the entry form as a new product.
    ///
    /// Returns the stored product and the form ready for the next piece.
    /// Nothing is stored when the form is invalid, the photo code is unknown,
    /// or the HSN code is already taken. A typed photo code is checked even
    /// when a file was picked, and the picked file still wins. A picked photo
    /// is uploaded before the HSN check, so a duplicate can leave an orphaned
    /// object behind.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] describing the first failure.
    pub async fn submit(&self, form: ProductForm) -> Result<(Product, ProductForm), CatalogError> {
        let mut product = form.to_new_product()?;
        let code = form.photo_code()?;

        let registered = match &code {
            Some(code) => Some(self.registered_image(code).await?),
            None => None,
        };

        product.stock_photo = match form.photo_source(code.as_ref()) {
            PhotoSource::Upload(upload) => Some(self.upload_photo(upload).await?),
            PhotoSource::Code(_) => registered,
            PhotoSource::None => None,
        };

        // Check-then-insert; two concurrent entries can still race.
        if self.products.find_by_hsn(&product.hsn).await?.is_some() {
            return Err(CatalogError::DuplicateHsn(product.hsn));
        }

        let created = self.products.create_product(product).await?;

        info!(id = %created.id, hsn = %created.hsn, "product created");

        Ok((created, form.apply(FormEvent::Submitted)))
    }

    /// Save edits to a stored product, uploading a replacement photo if one
    /// was picked.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the form is invalid or a store call fails.
    pub async fn update(&self, id: ProductId, form: &EditForm) -> Result<Product, CatalogError> {
        let mut update = form.to_update()?;

        if let Some(upload) = form.photo() {
            update.stock_photo = Some(self.upload_photo(upload).await?);
        }

        let product = self.products.update_product(id, update).await?;

        info!(%id, "product updated");

        Ok(product)
    }

    /// One page of the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PageZero`] or [`CatalogError::InvalidPage`] for
    /// pages outside the listing, or a store error.
    pub async fn list(&self, request: &ListRequest) -> Result<CatalogPage, CatalogError> {
        let query = request.to_query()?;
        let page = self.products.list_products(&query).await?;

        CatalogPage::new(page.products, request.page, page.total)
    }

    /// A single product.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the product does not exist.
    pub async fn get(&self, id: ProductId) -> Result<Product, CatalogError> {
        Ok(self.products.get_product(id).await?)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the product does not exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), CatalogError> {
        self.products.delete_product(id).await?;

        info!(%id, "product deleted");

        Ok(())
    }

    /// Put a product on, or take it off, the display counter.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the product does not exist.
    pub async fn set_counter(&self, id: ProductId, selected: bool) -> Result<Product, CatalogError> {
        let product = self.products.set_selected(id, selected).await?;

        info!(%id, selected, "counter selection changed");

        Ok(product)
    }

    /// Totals for the pieces on the display counter.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the store call or the totals fail.
    pub async fn counter_summary(&self) -> Result<CounterSummary, CatalogError> {
        let products = self.products.selected_products().await?;

        Ok(counter_total(&products)?)
    }

    /// Public URL of a stored photo.
    #[must_use]
    pub fn photo_url(&self, path: &str) -> String {
        self.storage.public_url(&self.settings.photo_bucket, path)
    }

    async fn registered_image(&self, code: &PhotoCode) -> Result<String, CatalogError> {
        self.image_codes
            .find_image(code)
            .await?
            .ok_or_else(|| CatalogError::InvalidPhotoCode(code.clone()))
    }

    async fn upload_photo(&self, upload: &PhotoUpload) -> Result<String, CatalogError> {
        let name = upload.object_name(Timestamp::now().as_millisecond());

        let path = self
            .storage
            .upload(
                &self.settings.photo_bucket,
                &name,
                &upload.content_type,
                upload.bytes.clone(),
            )
            .await?;

        debug!(%path, "photo uploaded");

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use karat::{
        forms::{EditEvent, EditField, FormField},
        products::NewProduct,
    };
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use super::*;
    use crate::{
        domain::{
            image_codes::MockImageCodesService,
            products::{MockProductsService, ProductPage, ProductsServiceError},
            storage::MockStorageService,
        },
        test::helpers::{filled_form, stored},
    };

    fn catalog(
        products: MockProductsService,
        image_codes: MockImageCodesService,
        storage: MockStorageService,
    ) -> Catalog {
        Catalog::new(
            Arc::new(products),
            Arc::new(image_codes),
            Arc::new(storage),
            CatalogSettings::default(),
        )
    }

    fn created(product: &NewProduct) -> Product {
        Product {
            hsn: product.hsn.clone(),
            name: product.name.clone(),
            stock_photo: product.stock_photo.clone(),
            ..stored(7, product.hsn.as_str())
        }
    }

    #[tokio::test]
    async fn submit_stores_the_product_and_advances_the_hsn() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_find_by_hsn()
            .once()
            .withf(|hsn| hsn.as_str() == "12345678")
            .return_once(|_| Ok(None));

        products
            .expect_create_product()
            .once()
            .withf(|product| product.name == "gold ring" && product.stock_photo.is_none())
            .returning(|product| Ok(created(&product)));

        let (product, next) = catalog(
            products,
            MockImageCodesService::new(),
            MockStorageService::new(),
        )
        .submit(filled_form())
        .await?;

        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(next.value(FormField::Hsn), "12345679");
        assert_eq!(next.value(FormField::Name), "");
        assert_eq!(next.value(FormField::Category), "ring");

        Ok(())
    }

    #[tokio::test]
    async fn invalid_forms_never_reach_the_store() {
        let mut products = MockProductsService::new();

        products.expect_find_by_hsn().never();
        products.expect_create_product().never();

        let form = filled_form().apply(FormEvent::FieldChanged(FormField::Price, String::new()));

        let result = catalog(
            products,
            MockImageCodesService::new(),
            MockStorageService::new(),
        )
        .submit(form)
        .await;

        assert!(matches!(result, Err(CatalogError::Form(_))), "got {result:?}");
    }

    #[tokio::test]
    async fn duplicate_hsn_codes_are_rejected() {
        let mut products = MockProductsService::new();

        products
            .expect_find_by_hsn()
            .once()
            .return_once(|hsn| Ok(Some(stored(3, hsn.as_str()))));

        products.expect_create_product().never();

        let result = catalog(
            products,
            MockImageCodesService::new(),
            MockStorageService::new(),
        )
        .submit(filled_form())
        .await;

        assert!(
            matches!(&result, Err(CatalogError::DuplicateHsn(hsn)) if hsn.as_str() == "12345678"),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn photo_codes_resolve_through_the_registry() -> TestResult {
        let mut products = MockProductsService::new();
        let mut image_codes = MockImageCodesService::new();

        image_codes
            .expect_find_image()
            .once()
            .withf(|code| code.as_str() == "4821")
            .return_once(|_| Ok(Some("1700000000000.jpg".to_string())));

        products.expect_find_by_hsn().return_once(|_| Ok(None));

        products
            .expect_create_product()
            .once()
            .withf(|product| product.stock_photo.as_deref() == Some("1700000000000.jpg"))
            .returning(|product| Ok(created(&product)));

        let form = filled_form().apply(FormEvent::FieldChanged(FormField::PhotoCode, "4821".into()));

        let (product, _) = catalog(products, image_codes, MockStorageService::new())
            .submit(form)
            .await?;

        assert_eq!(product.stock_photo.as_deref(), Some("1700000000000.jpg"));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_photo_codes_stop_the_submit() {
        let mut products = MockProductsService::new();
        let mut image_codes = MockImageCodesService::new();

        image_codes.expect_find_image().once().return_once(|_| Ok(None));
        products.expect_find_by_hsn().never();
        products.expect_create_product().never();

        let form = filled_form().apply(FormEvent::FieldChanged(FormField::PhotoCode, "9999".into()));

        let result = catalog(products, image_codes, MockStorageService::new())
            .submit(form)
            .await;

        assert!(
            matches!(&result, Err(CatalogError::InvalidPhotoCode(code)) if code.as_str() == "9999"),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_photo_codes_are_caught_even_with_a_picked_file() {
        let mut products = MockProductsService::new();
        let mut image_codes = MockImageCodesService::new();
        let mut storage = MockStorageService::new();

        image_codes.expect_find_image().once().return_once(|_| Ok(None));
        storage.expect_upload().never();
        products.expect_find_by_hsn().never();
        products.expect_create_product().never();

        let form = filled_form()
            .apply(FormEvent::FieldChanged(FormField::PhotoCode, "9999".into()))
            .apply(FormEvent::PhotoSelected(PhotoUpload::new(
                "front view.png",
                b"png".to_vec(),
            )));

        let result = catalog(products, image_codes, storage).submit(form).await;

        assert!(
            matches!(&result, Err(CatalogError::InvalidPhotoCode(code)) if code.as_str() == "9999"),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn picked_files_win_over_photo_codes() -> TestResult {
        let mut products = MockProductsService::new();
        let mut image_codes = MockImageCodesService::new();
        let mut storage = MockStorageService::new();

        image_codes
            .expect_find_image()
            .once()
            .withf(|code| code.as_str() == "4821")
            .return_once(|_| Ok(Some("registered.jpg".to_string())));

        storage
            .expect_upload()
            .once()
            .withf(|bucket, name, content_type, bytes| {
                bucket == "product-images"
                    && name.ends_with("_front_view.png")
                    && content_type == "image/png"
                    && bytes == b"png"
            })
            .returning(|_, name, _, _| Ok(name.to_string()));

        products.expect_find_by_hsn().return_once(|_| Ok(None));
        products
            .expect_create_product()
            .returning(|product| Ok(created(&product)));

        let form = filled_form()
            .apply(FormEvent::FieldChanged(FormField::PhotoCode, "4821".into()))
            .apply(FormEvent::PhotoSelected(PhotoUpload::new(
                "front view.png",
                b"png".to_vec(),
            )));

        let (product, next) = catalog(products, image_codes, storage).submit(form).await?;

        assert!(
            product
                .stock_photo
                .is_some_and(|path| path.ends_with("_front_view.png"))
        );
        assert!(next.photo().is_none());

        Ok(())
    }

    #[tokio::test]
    async fn generate_hsn_retries_collisions() -> TestResult {
        let mut products = MockProductsService::new();
        let mut calls = 0;

        products.expect_find_by_hsn().times(3).returning(move |hsn| {
            calls += 1;

            Ok((calls < 3).then(|| stored(1, hsn.as_str())))
        });

        let hsn = catalog(
            products,
            MockImageCodesService::new(),
            MockStorageService::new(),
        )
        .generate_hsn()
        .await?;

        assert!(!hsn.as_str().starts_with('0'));

        Ok(())
    }

    #[tokio::test]
    async fn generate_hsn_gives_up_after_the_attempt_limit() {
        let mut products = MockProductsService::new();

        products
            .expect_find_by_hsn()
            .times(2)
            .returning(|hsn| Ok(Some(stored(1, hsn.as_str()))));

        let catalog = Catalog::new(
            Arc::new(products),
            Arc::new(MockImageCodesService::new()),
            Arc::new(MockStorageService::new()),
            CatalogSettings {
                max_hsn_attempts: 2,
                ..CatalogSettings::default()
            },
        );

        let result = catalog.generate_hsn().await;

        assert!(
            matches!(result, Err(CatalogError::HsnExhausted { attempts: 2 })),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn edits_keep_the_stored_photo_without_a_new_file() -> TestResult {
        let mut products = MockProductsService::new();
        let mut storage = MockStorageService::new();

        storage.expect_upload().never();

        products
            .expect_update_product()
            .once()
            .withf(|id, update| *id == ProductId::new(5) && update.stock_photo.is_none())
            .return_once(|_, _| Ok(stored(5, "12345678")));

        let form = EditForm::from_product(&stored(5, "12345678"))
            .apply(EditEvent::FieldChanged(EditField::Discount, "10".into()));

        catalog(products, MockImageCodesService::new(), storage)
            .update(ProductId::new(5), &form)
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn listing_rejects_pages_past_the_end() {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|query| query.offset == 40)
            .return_once(|_| {
                Ok(ProductPage {
                    products: Vec::new(),
                    total: 11,
                })
            });

        let result = catalog(
            products,
            MockImageCodesService::new(),
            MockStorageService::new(),
        )
        .list(&ListRequest {
            page: 5,
            ..ListRequest::default()
        })
        .await;

        assert!(
            matches!(
                result,
                Err(CatalogError::InvalidPage {
                    page: 5,
                    total_pages: 2
                })
            ),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn counter_summary_totals_selected_products() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_selected_products().once().return_once(|| {
            Ok(vec![
                Product {
                    selected: true,
                    ..stored(1, "12345678")
                },
                Product {
                    selected: true,
                    discount: 10.into(),
                    ..stored(2, "23456789")
                },
            ])
        });

        let summary = catalog(
            products,
            MockImageCodesService::new(),
            MockStorageService::new(),
        )
        .counter_summary()
        .await?;

        assert_eq!(summary.products().len(), 2);
        assert_eq!(
            summary.subtotal(),
            Money::from_decimal(Decimal::from(129_000), iso::INR)
        );
        assert_eq!(
            summary.total(),
            Money::from_decimal(Decimal::from(122_550), iso::INR)
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleting_a_missing_product_is_reported() {
        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let result = catalog(
            products,
            MockImageCodesService::new(),
            MockStorageService::new(),
        )
        .delete(ProductId::new(9))
        .await;

        assert!(
            matches!(result, Err(CatalogError::Products(ProductsServiceError::NotFound))),
            "got {result:?}"
        );
    }

    #[test]
    fn photo_urls_use_the_photo_bucket() {
        let mut storage = MockStorageService::new();

        storage
            .expect_public_url()
            .withf(|bucket, path| bucket == "product-images" && path == "a.jpg")
            .return_const("https://shop/storage/v1/object/public/product-images/a.jpg".to_string());

        let url = catalog(
            MockProductsService::new(),
            MockImageCodesService::new(),
            storage,
        )
        .photo_url("a.jpg");

        assert!(url.ends_with("/product-images/a.jpg"));
    }
}

//! Products service.

use async_trait::async_trait;
use karat::{
    hsn::HsnCode,
    products::{NewProduct, Product, ProductId, ProductUpdate},
};
use mockall::automock;

use crate::{
    backend::{Direction, Query, SupabaseClient},
    domain::products::{
        errors::ProductsServiceError,
        records::{
            NewProductRecord, PRODUCTS_TABLE, ProductRecord, ProductUpdateRecord, SelectionRecord,
            products_from,
        },
    },
};

/// Column products can be listed by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ProductColumn {
    /// Insertion order.
    #[default]
    Id,
    /// Product name.
    Name,
    /// List price.
    Price,
    /// Gross weight.
    Weight,
    /// HSN code.
    Hsn,
    /// Category.
    Category,
}

impl ProductColumn {
    /// Column name in the products table.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProductColumn::Id => "id",
            ProductColumn::Name => "name",
            ProductColumn::Price => "price",
            ProductColumn::Weight => "weight",
            ProductColumn::Hsn => "hsn",
            ProductColumn::Category => "category",
        }
    }
}

/// One page of a product listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub offset: u64,
    pub limit: u64,
    pub search: Option<String>,
    pub order: ProductColumn,
    pub direction: Direction,
}

impl ProductQuery {
    fn to_query(&self) -> Query {
        let query = Query::new()
            .order(self.order.as_str(), self.direction)
            .range(self.offset, self.limit);

        match self.search.as_deref().map(str::trim) {
            Some(search) if !search.is_empty() => query.ilike("name", search),
            _ => query,
        }
    }
}

/// A page of products plus the total number of matches.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: u64,
}

#[derive(Debug, Clone)]
pub struct RestProductsService {
    client: SupabaseClient,
}

impl RestProductsService {
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn by_id(id: ProductId) -> Query {
        Query::new().eq("id", id)
    }

    fn first(records: Vec<ProductRecord>) -> Result<Option<Product>, ProductsServiceError> {
        records.into_iter().next().map(Self::product).transpose()
    }

    fn product(record: ProductRecord) -> Result<Product, ProductsServiceError> {
        let id = record.id;

        Product::try_from(record)
            .map_err(|source| ProductsServiceError::InvalidRecord { id, source })
    }
}

#[async_trait]
impl ProductsService for RestProductsService {
    async fn find_by_hsn(&self, hsn: &HsnCode) -> Result<Option<Product>, ProductsServiceError> {
        let records: Vec<ProductRecord> = self
            .client
            .select(PRODUCTS_TABLE, &Query::new().eq("hsn", hsn).limit(1))
            .await?;

        Self::first(records)
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ProductsServiceError> {
        let records: Vec<ProductRecord> = self
            .client
            .select(PRODUCTS_TABLE, &Self::by_id(id).limit(1))
            .await?;

        Self::first(records)?.ok_or(ProductsServiceError::NotFound)
    }

    async fn list_products(
        &self,
        query: &ProductQuery,
    ) -> Result<ProductPage, ProductsServiceError> {
        let (records, total): (Vec<ProductRecord>, u64) = self
            .client
            .select_counted(PRODUCTS_TABLE, &query.to_query())
            .await?;

        Ok(ProductPage {
            products: products_from(records),
            total,
        })
    }

    async fn selected_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let records: Vec<ProductRecord> = self
            .client
            .select(
                PRODUCTS_TABLE,
                &Query::new()
                    .eq("selected", true)
                    .order("id", Direction::Asc),
            )
            .await?;

        Ok(products_from(records))
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let record: ProductRecord = self
            .client
            .insert(PRODUCTS_TABLE, &NewProductRecord::from(&product))
            .await?;

        Self::product(record)
    }

    async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let records: Vec<ProductRecord> = self
            .client
            .update(
                PRODUCTS_TABLE,
                &Self::by_id(id),
                &ProductUpdateRecord::from(&update),
            )
            .await?;

        Self::first(records)?.ok_or(ProductsServiceError::NotFound)
    }

    async fn set_selected(
        &self,
        id: ProductId,
        selected: bool,
    ) -> Result<Product, ProductsServiceError> {
        let records: Vec<ProductRecord> = self
            .client
            .update(PRODUCTS_TABLE, &Self::by_id(id), &SelectionRecord { selected })
            .await?;

        Self::first(records)?.ok_or(ProductsServiceError::NotFound)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ProductsServiceError> {
        let deleted: Vec<ProductRecord> =
            self.client.delete(PRODUCTS_TABLE, &Self::by_id(id)).await?;

        if deleted.is_empty() {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Look a product up by its HSN code.
    async fn find_by_hsn(&self, hsn: &HsnCode) -> Result<Option<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, id: ProductId) -> Result<Product, ProductsServiceError>;

    /// Retrieve one page of products with the total match count.
    async fn list_products(&self, query: &ProductQuery)
    -> Result<ProductPage, ProductsServiceError>;

    /// Retrieve the products selected for the display counter.
    async fn selected_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Store a new product.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Apply edits to a stored product.
    async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Add a product to, or remove it from, the display counter.
    async fn set_selected(
        &self,
        id: ProductId,
        selected: bool,
    ) -> Result<Product, ProductsServiceError>;

    /// Delete a product.
    async fn delete_product(&self, id: ProductId) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use httpmock::{Method, prelude::*};
    use reqwest::Client;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn service(server: &MockServer) -> RestProductsService {
        RestProductsService::new(SupabaseClient::with_http(
            &server.base_url(),
            "key".to_string(),
            Client::new(),
        ))
    }

    fn row(id: i64, hsn: &str) -> serde_json::Value {
        json!({
            "id": id,
            "hsn": hsn,
            "name": "gold ring",
            "category": "ring",
            "weight": 10,
            "price": 64500,
            "discount": 0,
            "selected": false
        })
    }

    #[tokio::test]
    async fn find_by_hsn_returns_none_for_unknown_codes() -> TestResult {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/v1/products")
                    .query_param("hsn", "eq.12345678")
                    .query_param("limit", "1");
                then.status(200).json_body(json!([]));
            })
            .await;

        let found = service(&server).find_by_hsn(&"12345678".parse()?).await?;

        assert!(found.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn list_products_pages_and_searches() -> TestResult {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/v1/products")
                    .query_param("name", "ilike.*ring*")
                    .query_param("order", "price.desc")
                    .query_param("offset", "10")
                    .query_param("limit", "10");
                then.status(200)
                    .header("content-range", "10-10/11")
                    .json_body(json!([row(11, "12345678")]));
            })
            .await;

        let page = service(&server)
            .list_products(&ProductQuery {
                offset: 10,
                limit: 10,
                search: Some(" ring ".to_string()),
                order: ProductColumn::Price,
                direction: Direction::Desc,
            })
            .await?;

        mock.assert_async().await;
        assert_eq!(page.total, 11);
        assert_eq!(page.products.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn listings_skip_rows_with_invalid_hsn_codes() -> TestResult {
        let server = MockServer::start_async().await;
        let mut blank = row(2, "");

        blank["name"] = json!("legacy bangle");

        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/products");
                then.status(200)
                    .header("content-range", "0-1/2")
                    .json_body(json!([row(1, "12345678"), blank]));
            })
            .await;

        let page = service(&server)
            .list_products(&ProductQuery {
                limit: 10,
                ..ProductQuery::default()
            })
            .await?;

        assert_eq!(page.total, 2);
        assert_eq!(
            page.products
                .iter()
                .map(|product| product.id)
                .collect::<Vec<_>>(),
            vec![ProductId::new(1)]
        );

        Ok(())
    }

    #[tokio::test]
    async fn a_single_row_with_an_invalid_hsn_code_is_reported() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/v1/products")
                    .query_param("id", "eq.7");
                then.status(200).json_body(json!([row(7, "123")]));
            })
            .await;

        let result = service(&server).get_product(ProductId::new(7)).await;

        assert!(
            matches!(
                result,
                Err(ProductsServiceError::InvalidRecord { id, .. }) if id == ProductId::new(7)
            ),
            "expected InvalidRecord, got {result:?}"
        );
    }

    #[tokio::test]
    async fn deleting_a_missing_product_is_not_found() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(DELETE)
                    .path("/rest/v1/products")
                    .query_param("id", "eq.99");
                then.status(200).json_body(json!([]));
            })
            .await;

        let result = service(&server).delete_product(ProductId::new(99)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn set_selected_patches_the_flag() -> TestResult {
        let server = MockServer::start_async().await;
        let mut updated = row(3, "23456789");

        updated["selected"] = json!(true);

        let mock = server
            .mock_async(|when, then| {
                when.method(Method::PATCH)
                    .path("/rest/v1/products")
                    .query_param("id", "eq.3")
                    .json_body(json!({ "selected": true }));
                then.status(200).json_body(json!([updated]));
            })
            .await;

        let product = service(&server)
            .set_selected(ProductId::new(3), true)
            .await?;

        mock.assert_async().await;
        assert_eq!(product.id, ProductId::new(3));
        assert!(product.selected);

        Ok(())
    }
}

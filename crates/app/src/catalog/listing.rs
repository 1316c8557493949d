//! Catalog listing pages.

use karat::products::Product;

use crate::{
    backend::Direction,
    catalog::CatalogError,
    domain::products::{ProductColumn, ProductQuery},
};

/// Products shown per listing page.
pub const PAGE_SIZE: u64 = 10;

/// A listing page request. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub page: u64,
    pub search: Option<String>,
    pub order: ProductColumn,
    pub direction: Direction,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            page: 1,
            search: None,
            order: ProductColumn::default(),
            direction: Direction::default(),
        }
    }
}

impl ListRequest {
    pub(crate) fn to_query(&self) -> Result<ProductQuery, CatalogError> {
        let offset = self
            .page
            .checked_sub(1)
            .ok_or(CatalogError::PageZero)?
            .saturating_mul(PAGE_SIZE);

        Ok(ProductQuery {
            offset,
            limit: PAGE_SIZE,
            search: self.search.clone(),
            order: self.order,
            direction: self.direction,
        })
    }
}

/// One page of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub products: Vec<Product>,
    pub page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl CatalogPage {
    pub(crate) fn new(products: Vec<Product>, page: u64, total: u64) -> Result<Self, CatalogError> {
        let total_pages = total.div_ceil(PAGE_SIZE);

        // An empty catalog still has a first page.
        if page > total_pages && page != 1 {
            return Err(CatalogError::InvalidPage { page, total_pages });
        }

        Ok(Self {
            products,
            page,
            total,
            total_pages,
        })
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

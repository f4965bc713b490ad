//! Product catalog operations.
//!
//! [`ProductCatalog`] orchestrates one logical operation per call on top of
//! any [`ProductStore`]: body validation before writes, and the
//! count-then-page sequence for filtered listings.

use forestal_core::error::CoreError;
use forestal_core::filter::{self, FilterCriteria};
use forestal_core::pagination::PagedResult;
use forestal_core::product::{self as product_rules, ENTITY};
use forestal_core::query::ProductPredicate;
use forestal_core::types::DbId;
use validator::Validate;

use crate::error::CatalogResult;
use crate::models::product::{Product, ProductFields};
use crate::store::ProductStore;

/// Provides the catalog operations. Every method takes the store as its
/// first argument.
pub struct ProductCatalog;

impl ProductCatalog {
    /// All products, unfiltered and unpaginated.
    pub async fn list_all<S>(store: &S) -> CatalogResult<Vec<Product>>
    where
        S: ProductStore + ?Sized,
    {
        Ok(store.list_all().await?)
    }

    /// Look up one product. `Ok(None)` means no row has that id.
    pub async fn get_by_id<S>(store: &S, id: DbId) -> CatalogResult<Option<Product>>
    where
        S: ProductStore + ?Sized,
    {
        Ok(store.find_by_id(id).await?)
    }

    /// Like [`get_by_id`](Self::get_by_id) but a missing row is a
    /// [`CoreError::NotFound`].
    pub async fn get_required<S>(store: &S, id: DbId) -> CatalogResult<Product>
    where
        S: ProductStore + ?Sized,
    {
        Self::get_by_id(store, id)
            .await?
            .ok_or_else(|| CoreError::NotFound { entity: ENTITY, id }.into())
    }

    /// Free-text search over name, type and brand.
    pub async fn search<S>(store: &S, term: &str) -> CatalogResult<Vec<Product>>
    where
        S: ProductStore + ?Sized,
    {
        let term = filter::validate_search_term(Some(term))?;
        Ok(store.search(term).await?)
    }

    /// Filtered, optionally price-ordered, paginated listing.
    ///
    /// Counts first; an empty match set returns without a page query. A page
    /// past the end is clamped to the last page.
    pub async fn filter_paginated<S>(
        store: &S,
        criteria: &FilterCriteria,
    ) -> CatalogResult<PagedResult<Product>>
    where
        S: ProductStore + ?Sized,
    {
        let predicate = ProductPredicate::from_criteria(criteria);
        let result = store
            .filter_page(&predicate, criteria.sort, &criteria.page)
            .await?;

        if result.total > 0 && result.page != criteria.page.pagina() {
            tracing::debug!(
                requested = criteria.page.pagina(),
                served = result.page,
                total_pages = result.total_pages,
                "Requested page past the end, serving last page",
            );
        }

        Ok(result)
    }

    /// Insert a product from a raw JSON body and return its id.
    ///
    /// The body is checked for all required fields before any statement runs.
    pub async fn create<S>(store: &S, body: serde_json::Value) -> CatalogResult<DbId>
    where
        S: ProductStore + ?Sized,
    {
        let fields = parse_fields(body)?;
        Ok(store.insert(&fields).await?)
    }

    /// Overwrite every field of product `id`. Returns rows affected (0 or 1);
    /// a missing id is not an error here.
    pub async fn update<S>(store: &S, id: DbId, body: serde_json::Value) -> CatalogResult<u64>
    where
        S: ProductStore + ?Sized,
    {
        let fields = parse_fields(body)?;
        Ok(store.update(id, &fields).await?)
    }

    /// Delete product `id`. Returns rows affected (0 or 1).
    pub async fn delete<S>(store: &S, id: DbId) -> CatalogResult<u64>
    where
        S: ProductStore + ?Sized,
    {
        Ok(store.delete(id).await?)
    }
}

/// Validate a write body: required fields present, types correct, values
/// within bounds.
pub fn parse_fields(body: serde_json::Value) -> Result<ProductFields, CoreError> {
    product_rules::ensure_required_fields(&body)?;

    let fields: ProductFields = serde_json::from_value(body)
        .map_err(|e| CoreError::Validation(format!("Cuerpo de producto inválido: {e}")))?;

    fields
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    Ok(fields)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! The data-store capability the catalog runs on.

use async_trait::async_trait;
use forestal_core::filter::SortOrder;
use forestal_core::pagination::{PageRequest, PagedResult};
use forestal_core::query::ProductPredicate;
use forestal_core::types::DbId;

use crate::models::product::{Product, ProductFields};

/// Executes product statements against some backing table.
///
/// Every method is one logical operation on one connection. Implementations
/// must not retry and must report failures as `sqlx::Error`.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All rows, ordered by id.
    async fn list_all(&self) -> Result<Vec<Product>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Product>, sqlx::Error>;

    /// Case-insensitive substring match on name, type and brand.
    async fn search(&self, term: &str) -> Result<Vec<Product>, sqlx::Error>;

    /// One page of rows matching `predicate`, in price order when `sort` is
    /// set, plus the total match count.
    ///
    /// The count and the page are read over the same connection. When nothing
    /// matches, no page statement is issued. A requested page past the end is
    /// served as the last page.
    async fn filter_page(
        &self,
        predicate: &ProductPredicate,
        sort: Option<SortOrder>,
        request: &PageRequest,
    ) -> Result<PagedResult<Product>, sqlx::Error>;

    /// Insert a product and return its new id.
    async fn insert(&self, fields: &ProductFields) -> Result<DbId, sqlx::Error>;

    /// Overwrite all fields of `id`. Returns rows affected (0 or 1).
    async fn update(&self, id: DbId, fields: &ProductFields) -> Result<u64, sqlx::Error>;

    /// Delete `id`. Returns rows affected (0 or 1).
    async fn delete(&self, id: DbId) -> Result<u64, sqlx::Error>;
}

//! In-memory [`ProductStore`] for development and tests.
//!
//! Evaluates the same typed predicates the PostgreSQL store renders to SQL,
//! so catalog behaviour can be exercised without a database.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use forestal_core::filter::SortOrder;
use forestal_core::pagination::{self, PageRequest, PagedResult};
use forestal_core::query::{BindValue, Clause, Column, ProductPredicate, SEARCH_COLUMNS};
use forestal_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::product::{Product, ProductFields};
use crate::store::ProductStore;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<DbId, Product>,
    last_id: DbId,
}

/// A `productos` table held in memory. Ids are assigned sequentially from 1.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductStore {
    table: Arc<RwLock<Table>>,
    offline: bool,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails as if the database were unreachable.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn check_online(&self) -> Result<(), sqlx::Error> {
        if self.offline {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, sqlx::Error> {
        self.check_online()?;
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        self.check_online()?;
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, sqlx::Error> {
        self.check_online()?;
        let needle = term.to_lowercase();
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|p| {
                SEARCH_COLUMNS.iter().any(|column| {
                    text_value(p, *column).is_some_and(|v| v.to_lowercase().contains(&needle))
                })
            })
            .cloned()
            .collect())
    }

    async fn filter_page(
        &self,
        predicate: &ProductPredicate,
        sort: Option<SortOrder>,
        request: &PageRequest,
    ) -> Result<PagedResult<Product>, sqlx::Error> {
        self.check_online()?;
        let table = self.table.read().await;
        let mut rows: Vec<&Product> = table
            .rows
            .values()
            .filter(|p| matches_predicate(p, predicate))
            .collect();

        let total = rows.len() as i64;
        let Some(window) = pagination::plan_window(request, total) else {
            return Ok(PagedResult::empty(request));
        };

        match sort {
            Some(SortOrder::Asc) => rows.sort_by(|a, b| a.precio.total_cmp(&b.precio)),
            Some(SortOrder::Desc) => rows.sort_by(|a, b| b.precio.total_cmp(&a.precio)),
            None => {}
        }

        let page = rows
            .into_iter()
            .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(window.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(PagedResult::from_window(page, total, &window))
    }

    async fn insert(&self, fields: &ProductFields) -> Result<DbId, sqlx::Error> {
        self.check_online()?;
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        table
            .rows
            .insert(id, Product::from_fields(id, fields.clone()));
        Ok(id)
    }

    async fn update(&self, id: DbId, fields: &ProductFields) -> Result<u64, sqlx::Error> {
        self.check_online()?;
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = Product::from_fields(id, fields.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: DbId) -> Result<u64, sqlx::Error> {
        self.check_online()?;
        let mut table = self.table.write().await;
        Ok(u64::from(table.rows.remove(&id).is_some()))
    }
}

// ---------------------------------------------------------------------------
// Predicate evaluation
// ---------------------------------------------------------------------------

fn text_value(product: &Product, column: Column) -> Option<&str> {
    match column {
        Column::Nombre => Some(product.nombre.as_str()),
        Column::Tipo => Some(product.tipo.as_str()),
        Column::Marca => Some(product.marca.as_str()),
        Column::Precio => None,
    }
}

fn matches_clause(product: &Product, clause: &Clause) -> bool {
    let ordering = match (&clause.value, clause.column) {
        (BindValue::Price(bound), Column::Precio) => product.precio.partial_cmp(bound),
        (BindValue::Text(bound), column) => {
            text_value(product, column).map(|v| v.cmp(bound.as_str()))
        }
        (BindValue::Price(_), _) => None,
    };
    ordering.is_some_and(|o| clause.comparison.holds(o))
}

fn matches_predicate(product: &Product, predicate: &ProductPredicate) -> bool {
    predicate
        .clauses()
        .iter()
        .all(|clause| matches_clause(product, clause))
}

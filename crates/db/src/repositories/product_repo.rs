//! PostgreSQL implementation of [`ProductStore`] for the `productos` table.

use async_trait::async_trait;
use forestal_core::filter::SortOrder;
use forestal_core::pagination::{self, PageRequest, PagedResult};
use forestal_core::query::{self, BindValue, ProductPredicate, COLUMNS, INSERT_COLUMNS, TABLE};
use forestal_core::types::DbId;

use crate::models::product::{Product, ProductFields};
use crate::store::ProductStore;
use crate::DbPool;

/// Product statements executed on a pooled PostgreSQL connection.
///
/// Each call checks one connection out of the pool and returns it when done.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: DbPool,
}

impl PgProductStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} ORDER BY id");
        sqlx::query_as::<_, Product>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, sqlx::Error> {
        let sql = query::search_sql();
        sqlx::query_as::<_, Product>(&sql)
            .bind(query::like_pattern(term))
            .fetch_all(&self.pool)
            .await
    }

    async fn filter_page(
        &self,
        predicate: &ProductPredicate,
        sort: Option<SortOrder>,
        request: &PageRequest,
    ) -> Result<PagedResult<Product>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;

        let count_query = predicate.count_sql();
        let total = bind_predicate_scalar(sqlx::query_scalar::<_, i64>(&count_query), predicate)
            .fetch_one(&mut *conn)
            .await?;

        let Some(window) = pagination::plan_window(request, total) else {
            return Ok(PagedResult::empty(request));
        };

        let page_query = predicate.page_sql(sort);
        let rows = bind_predicate(sqlx::query_as::<_, Product>(&page_query), predicate)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&mut *conn)
            .await?;

        Ok(PagedResult::from_window(rows, total, &window))
    }

    async fn insert(&self, fields: &ProductFields) -> Result<DbId, sqlx::Error> {
        let query = format!(
            "INSERT INTO {TABLE} ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id"
        );
        sqlx::query_scalar::<_, DbId>(&query)
            .bind(&fields.nombre)
            .bind(&fields.tipo)
            .bind(&fields.marca)
            .bind(&fields.descripcion)
            .bind(fields.precio)
            .bind(fields.stock)
            .bind(&fields.imagen)
            .fetch_one(&self.pool)
            .await
    }

    async fn update(&self, id: DbId, fields: &ProductFields) -> Result<u64, sqlx::Error> {
        let query = format!(
            "UPDATE {TABLE} SET \
                nombre = $2, tipo = $3, marca = $4, descripcion = $5, \
                precio = $6, stock = $7, imagen = $8 \
             WHERE id = $1"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(&fields.nombre)
            .bind(&fields.tipo)
            .bind(&fields.marca)
            .bind(&fields.descripcion)
            .bind(fields.precio)
            .bind(fields.stock)
            .bind(&fields.imagen)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: DbId) -> Result<u64, sqlx::Error> {
        let query = format!("DELETE FROM {TABLE} WHERE id = $1");
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

// ---------------------------------------------------------------------------
// Bind helpers
// ---------------------------------------------------------------------------

/// Bind the predicate's values, in placeholder order, to a `QueryAs`.
fn bind_predicate<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    predicate: &'q ProductPredicate,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in predicate.binds() {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Price(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind the predicate's values, in placeholder order, to a `QueryScalar`.
fn bind_predicate_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    predicate: &'q ProductPredicate,
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in predicate.binds() {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Price(v) => q = q.bind(*v),
        }
    }
    q
}

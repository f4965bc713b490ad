//! SQL construction for product queries.
//!
//! Filters are held as typed [`Clause`]s, one per present criterion, each
//! carrying its bound value. SQL text is rendered only from the closed sets
//! of [`Column`] names and [`Comparison`] operators; every user-supplied value
//! is bound positionally (`$1`, `$2`, ...), including `LIMIT`/`OFFSET`.

use std::cmp::Ordering;

use crate::filter::{FilterCriteria, SortOrder};
use crate::types::Price;

/// Product table name.
pub const TABLE: &str = "productos";

/// Column list for `productos` SELECT queries.
pub const COLUMNS: &str = "id, nombre, tipo, marca, descripcion, precio, stock, imagen";

/// Column list for INSERT (excludes auto-generated `id`).
pub const INSERT_COLUMNS: &str = "nombre, tipo, marca, descripcion, precio, stock, imagen";

/// Columns matched by free-text search, combined with OR.
pub const SEARCH_COLUMNS: [Column; 3] = [Column::Nombre, Column::Tipo, Column::Marca];

// ---------------------------------------------------------------------------
// Clause building blocks
// ---------------------------------------------------------------------------

/// Columns that can appear in a generated condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Nombre,
    Tipo,
    Marca,
    Precio,
}

impl Column {
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Nombre => "nombre",
            Column::Tipo => "tipo",
            Column::Marca => "marca",
            Column::Precio => "precio",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gte,
    Lte,
}

impl Comparison {
    pub fn as_sql(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Gte => ">=",
            Comparison::Lte => "<=",
        }
    }

    /// Whether `row.cmp(bound)` satisfies this comparison.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Comparison::Eq => ordering == Ordering::Equal,
            Comparison::Gte => ordering != Ordering::Less,
            Comparison::Lte => ordering != Ordering::Greater,
        }
    }
}

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Price(Price),
}

/// One `column <op> $n` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub column: Column,
    pub comparison: Comparison,
    pub value: BindValue,
}

impl Clause {
    fn render(&self, bind_idx: usize) -> String {
        format!(
            "{} {} ${bind_idx}",
            self.column.as_str(),
            self.comparison.as_sql()
        )
    }
}

// ---------------------------------------------------------------------------
// ProductPredicate
// ---------------------------------------------------------------------------

/// The conjunction of filter clauses for a listing.
///
/// An empty predicate matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPredicate {
    clauses: Vec<Clause>,
}

impl ProductPredicate {
    /// Build the predicate for `criteria`.
    ///
    /// Clause order is fixed: `tipo`, `marca`, `precio >=`, `precio <=`.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let mut clauses = Vec::new();

        if let Some(ref tipo) = criteria.tipo {
            clauses.push(Clause {
                column: Column::Tipo,
                comparison: Comparison::Eq,
                value: BindValue::Text(tipo.clone()),
            });
        }
        if let Some(ref marca) = criteria.marca {
            clauses.push(Clause {
                column: Column::Marca,
                comparison: Comparison::Eq,
                value: BindValue::Text(marca.clone()),
            });
        }
        if let Some(min) = criteria.precio_min {
            clauses.push(Clause {
                column: Column::Precio,
                comparison: Comparison::Gte,
                value: BindValue::Price(min),
            });
        }
        if let Some(max) = criteria.precio_max {
            clauses.push(Clause {
                column: Column::Precio,
                comparison: Comparison::Lte,
                value: BindValue::Price(max),
            });
        }

        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Bound values in placeholder order.
    pub fn binds(&self) -> impl Iterator<Item = &BindValue> {
        self.clauses.iter().map(|c| &c.value)
    }

    /// Index of the first placeholder after the predicate's own binds.
    pub fn next_bind_index(&self) -> usize {
        self.clauses.len() + 1
    }

    /// `WHERE a AND b ...`, or an empty string when unconditioned.
    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            return String::new();
        }
        let conditions: Vec<String> = self
            .clauses
            .iter()
            .enumerate()
            .map(|(i, clause)| clause.render(i + 1))
            .collect();
        format!(" WHERE {}", conditions.join(" AND "))
    }

    /// Total-match count query.
    pub fn count_sql(&self) -> String {
        format!(
            "SELECT COUNT(*)::BIGINT AS total FROM {TABLE}{}",
            self.where_clause()
        )
    }

    /// Page query: the predicate, optional price ordering, then bound
    /// `LIMIT`/`OFFSET` placeholders following the predicate's binds.
    pub fn page_sql(&self, sort: Option<SortOrder>) -> String {
        let limit_idx = self.next_bind_index();
        let order_by = match sort {
            Some(order) => format!(" ORDER BY precio {}", order.as_sql()),
            None => String::new(),
        };
        format!(
            "SELECT {COLUMNS} FROM {TABLE}{where_clause}{order_by} LIMIT ${limit_idx} OFFSET ${offset_idx}",
            where_clause = self.where_clause(),
            offset_idx = limit_idx + 1,
        )
    }
}

// ---------------------------------------------------------------------------
// Free-text search
// ---------------------------------------------------------------------------

/// Case-insensitive substring search across [`SEARCH_COLUMNS`], with the
/// pattern bound once as `$1`.
pub fn search_sql() -> String {
    let conditions: Vec<String> = SEARCH_COLUMNS
        .iter()
        .map(|c| format!("{} ILIKE $1", c.as_str()))
        .collect();
    format!(
        "SELECT {COLUMNS} FROM {TABLE} WHERE {} ORDER BY id",
        conditions.join(" OR ")
    )
}

/// Wrap a search term into a `LIKE` substring pattern, escaping the
/// wildcard characters so the term matches literally.
///
/// ```
/// use forestal_core::query::like_pattern;
/// assert_eq!(like_pattern("stihl"), "%stihl%");
/// assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
/// ```
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

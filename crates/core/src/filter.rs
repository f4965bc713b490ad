//! Filter criteria for `GET /productos/filtrar`, and the parsing rules that
//! turn raw query-string values into them.
//!
//! Parameters arrive as strings so that malformed numbers produce our own
//! validation messages rather than a generic extractor rejection.

use serde::Deserialize;

use crate::error::CoreError;
use crate::pagination::{PageRequest, DEFAULT_PAGE, DEFAULT_PER_PAGE};
use crate::types::Price;

/// Maximum accepted length (in characters) of a free-text search term.
pub const MAX_SEARCH_TERM_LEN: usize = 200;

// ---------------------------------------------------------------------------
// SortOrder
// ---------------------------------------------------------------------------

/// Price ordering for the filtered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    /// Parse the `ordenar` parameter. Absent or empty means no ordering.
    pub fn parse_param(value: Option<&str>) -> Result<Option<Self>, CoreError> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some("asc") => Ok(Some(SortOrder::Asc)),
            Some("desc") => Ok(Some(SortOrder::Desc)),
            Some(_) => Err(CoreError::Validation(
                "El parámetro 'ordenar' solo puede ser 'asc' o 'desc'.".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Raw parameters
// ---------------------------------------------------------------------------

/// Query-string parameters exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub tipo: Option<String>,
    pub marca: Option<String>,
    pub precio_min: Option<String>,
    pub precio_max: Option<String>,
    pub ordenar: Option<String>,
    pub pagina: Option<String>,
    pub por_pagina: Option<String>,
}

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// Validated, request-scoped filter criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Exact match on `tipo`.
    pub tipo: Option<String>,
    /// Exact match on `marca`.
    pub marca: Option<String>,
    /// Inclusive lower price bound.
    pub precio_min: Option<Price>,
    /// Inclusive upper price bound.
    pub precio_max: Option<Price>,
    pub sort: Option<SortOrder>,
    pub page: PageRequest,
}

impl FilterCriteria {
    /// Validate raw parameters, applying defaults (`pagina=1`, `por_pagina=10`,
    /// no ordering).
    pub fn from_params(params: &FilterParams) -> Result<Self, CoreError> {
        let sort = SortOrder::parse_param(params.ordenar.as_deref())?;
        let pagina = parse_positive_int("pagina", params.pagina.as_deref(), DEFAULT_PAGE)?;
        let por_pagina =
            parse_positive_int("por_pagina", params.por_pagina.as_deref(), DEFAULT_PER_PAGE)?;

        Ok(Self {
            tipo: non_empty(params.tipo.as_deref()),
            marca: non_empty(params.marca.as_deref()),
            precio_min: parse_price("precio_min", params.precio_min.as_deref())?,
            precio_max: parse_price("precio_max", params.precio_max.as_deref())?,
            sort,
            page: PageRequest::new(pagina, por_pagina)?,
        })
    }
}

/// Trim a text filter; empty values count as absent.
fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse a 1-based integer parameter, falling back to `default` when absent.
fn parse_positive_int(name: &str, value: Option<&str>, default: i64) -> Result<i64, CoreError> {
    let invalid = || {
        CoreError::Validation(format!(
            "'{name}' debe ser un número mayor o igual a 1."
        ))
    };

    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => {
            let parsed: i64 = raw.parse().map_err(|_| invalid())?;
            if parsed < 1 {
                return Err(invalid());
            }
            Ok(parsed)
        }
    }
}

fn parse_price(name: &str, value: Option<&str>) -> Result<Option<Price>, CoreError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => match raw.parse::<Price>() {
            Ok(price) if price.is_finite() => Ok(Some(price)),
            _ => Err(CoreError::Validation(format!(
                "'{name}' debe ser un número."
            ))),
        },
    }
}

// ---------------------------------------------------------------------------
// Free-text search
// ---------------------------------------------------------------------------

/// Validate a free-text search term, returning it trimmed.
pub fn validate_search_term(term: Option<&str>) -> Result<&str, CoreError> {
    let term = term.map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Err(CoreError::Validation(
            "Debe proporcionar un parámetro 'termino'.".to_string(),
        ));
    }
    if term.chars().count() > MAX_SEARCH_TERM_LEN {
        return Err(CoreError::Validation(format!(
            "El parámetro 'termino' no puede superar {MAX_SEARCH_TERM_LEN} caracteres."
        )));
    }
    Ok(term)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

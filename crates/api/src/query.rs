//! Query parameter types for API handlers.
//!
//! The filter endpoint reads `forestal_core::filter::FilterParams` directly.

use serde::Deserialize;

/// `?termino=` for the free-text search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub termino: Option<String>,
}

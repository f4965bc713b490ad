pub mod health;
pub mod product;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Operational message served at `/`.
pub const WELCOME_MESSAGE: &str =
    "¡Conexión establecida! El sistema de la Tienda Forestal está operativo.";

/// Build the `/api` route tree.
///
/// ```text
/// /productos                  list, create
/// /productos/buscar           free-text search
/// /productos/filtrar          filtered, paginated listing
/// /productos/{id}             get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/productos", product::router())
}

/// Routes served outside `/api`: the welcome text and the health check.
pub fn root_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .merge(health::router())
}

async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

//! Route definitions for the `/productos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Routes mounted at `/productos`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /buscar          -> search
/// GET    /filtrar         -> filter
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::list).post(product::create))
        .route("/buscar", get(product::search))
        .route("/filtrar", get(product::filter))
        .route(
            "/{id}",
            get(product::get_by_id)
                .put(product::update)
                .delete(product::delete),
        )
}

//! Handlers for the `/productos` resource.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use forestal_core::filter::{FilterCriteria, FilterParams};
use forestal_core::pagination::PagedResult;
use forestal_core::types::DbId;
use forestal_db::models::product::{Product, ProductId};
use forestal_db::ProductCatalog;

use crate::error::{AppError, AppResult};
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Unwrap a JSON body, reporting unparseable input in the error envelope.
fn json_body(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<serde_json::Value> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected product body");
        AppError::BadRequest("Debe enviar un cuerpo JSON válido.".to_string())
    })
}

/// Unwrap a product id path segment, reporting non-numeric ids in the error
/// envelope.
fn path_id(path: Result<Path<DbId>, PathRejection>) -> AppResult<DbId> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected product id");
        AppError::BadRequest(
            "El identificador del producto debe ser un número entero.".to_string(),
        )
    })
}

/// GET /api/productos
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let products = ProductCatalog::list_all(state.products.as_ref()).await?;
    Ok(Json(DataResponse::new(products)))
}

/// GET /api/productos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<DataResponse<Product>>> {
    let id = path_id(path)?;
    let product = ProductCatalog::get_required(state.products.as_ref(), id).await?;
    Ok(Json(DataResponse::new(product)))
}

/// GET /api/productos/buscar?termino=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let term = params.termino.unwrap_or_default();
    let products = ProductCatalog::search(state.products.as_ref(), &term).await?;
    tracing::debug!(term = %term.trim(), hits = products.len(), "Product search");
    Ok(Json(DataResponse::new(products)))
}

/// GET /api/productos/filtrar
pub async fn filter(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> AppResult<Json<DataResponse<PagedResult<Product>>>> {
    let criteria = FilterCriteria::from_params(&params)?;
    let page = ProductCatalog::filter_paginated(state.products.as_ref(), &criteria).await?;
    Ok(Json(DataResponse::new(page)))
}

/// POST /api/productos
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<ProductId>>)> {
    let body = json_body(payload)?;
    let id = ProductCatalog::create(state.products.as_ref(), body).await?;
    tracing::info!(product_id = id, "Product created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            ProductId { id },
            "Producto creado correctamente",
        )),
    ))
}

/// PUT /api/productos/{id}
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<DataResponse<ProductId>>> {
    let id = path_id(path)?;
    let body = json_body(payload)?;
    let affected = ProductCatalog::update(state.products.as_ref(), id, body).await?;
    if affected == 0 {
        return Err(AppError::NotFound(
            "No se encontró el producto para actualizar".to_string(),
        ));
    }
    tracing::info!(product_id = id, "Product updated");
    Ok(Json(DataResponse::with_message(
        ProductId { id },
        "Producto actualizado correctamente",
    )))
}

/// DELETE /api/productos/{id}
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<DataResponse<ProductId>>> {
    let id = path_id(path)?;
    let affected = ProductCatalog::delete(state.products.as_ref(), id).await?;
    if affected == 0 {
        return Err(AppError::NotFound(
            "No se encontró el producto para eliminar".to_string(),
        ));
    }
    tracing::info!(product_id = id, "Product deleted");
    Ok(Json(DataResponse::with_message(
        ProductId { id },
        "Producto eliminado correctamente",
    )))
}

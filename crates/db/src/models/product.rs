//! Product catalog models and DTOs.

use forestal_core::types::{DbId, Price};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `productos` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: DbId,
    pub nombre: String,
    pub tipo: String,
    pub marca: String,
    pub descripcion: String,
    pub precio: Price,
    pub stock: i32,
    pub imagen: String,
}

impl Product {
    pub fn from_fields(id: DbId, fields: ProductFields) -> Self {
        Self {
            id,
            nombre: fields.nombre,
            tipo: fields.tipo,
            marca: fields.marca,
            descripcion: fields.descripcion,
            precio: fields.precio,
            stock: fields.stock,
            imagen: fields.imagen,
        }
    }
}

/// The seven writable product fields, used by both create and update.
///
/// Update overwrites every field, so there is no partial update DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductFields {
    #[validate(length(min = 1, max = 200, message = "'nombre' no puede estar vacío"))]
    pub nombre: String,
    #[validate(length(min = 1, max = 100, message = "'tipo' no puede estar vacío"))]
    pub tipo: String,
    #[validate(length(min = 1, max = 100, message = "'marca' no puede estar vacío"))]
    pub marca: String,
    #[validate(length(min = 1, message = "'descripcion' no puede estar vacío"))]
    pub descripcion: String,
    #[validate(range(min = 0.0, message = "'precio' no puede ser negativo"))]
    pub precio: Price,
    pub stock: i32,
    #[validate(length(min = 1, message = "'imagen' no puede estar vacío"))]
    pub imagen: String,
}

/// Identifier returned by create, update and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProductId {
    pub id: DbId,
}

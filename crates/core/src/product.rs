//! Product body rules shared by create and update.

use serde_json::Value;

use crate::error::CoreError;

/// Entity name used in not-found errors.
pub const ENTITY: &str = "Producto";

/// Fields every product body must carry. A `null` value counts as missing.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "nombre",
    "tipo",
    "marca",
    "descripcion",
    "precio",
    "stock",
    "imagen",
];

/// Names of required fields absent (or `null`) in `body`, in declaration order.
pub fn missing_fields(body: &serde_json::Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| body.get(*field).map_or(true, Value::is_null))
        .collect()
}

/// Check that `body` is a JSON object carrying every required field.
///
/// The error message lists all missing fields at once.
pub fn ensure_required_fields(body: &Value) -> Result<(), CoreError> {
    let object = body.as_object().ok_or_else(|| {
        CoreError::Validation("Debe enviar un cuerpo JSON válido.".to_string())
    })?;

    let missing = missing_fields(object);
    if !missing.is_empty() {
        return Err(CoreError::Validation(format!(
            "Faltan campos obligatorios: {}",
            missing.join(", ")
        )));
    }
    Ok(())
}

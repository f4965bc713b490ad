use forestal_core::error::CoreError;

/// Failure of a catalog operation.
///
/// Input and lookup problems surface as [`CoreError`]; anything the store
/// itself reports (unreachable database, failed statement) is `DataAccess`.
/// A stored value that cannot be decoded into the row type is a
/// [`CoreError::Internal`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Data access error: {0}")]
    DataAccess(#[source] sqlx::Error),
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { index, source } => CatalogError::Core(
                CoreError::Internal(format!("column {index} could not be decoded: {source}")),
            ),
            other => CatalogError::DataAccess(other),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn undecodable_column_is_internal() {
        let err = CatalogError::from(sqlx::Error::ColumnDecode {
            index: "\"stock\"".to_string(),
            source: "out of range integral type conversion attempted".into(),
        });
        assert_matches!(
            err,
            CatalogError::Core(CoreError::Internal(msg)) if msg.contains("stock")
        );
    }

    #[test]
    fn other_driver_errors_are_data_access() {
        assert_matches!(
            CatalogError::from(sqlx::Error::PoolTimedOut),
            CatalogError::DataAccess(sqlx::Error::PoolTimedOut)
        );
    }
}

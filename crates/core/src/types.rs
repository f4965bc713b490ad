/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Product prices are stored as `DOUBLE PRECISION`.
pub type Price = f64;

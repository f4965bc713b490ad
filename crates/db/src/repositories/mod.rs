//! Repository layer.
//!
//! Each repository implements a store trait from [`crate::store`] on top of
//! a pooled PostgreSQL connection.

pub mod product_repo;

pub use product_repo::PgProductStore;

//! Domain logic for the forestry store catalog.
//!
//! Everything in this crate is pure: no I/O and no database driver. The
//! `forestal-db` crate executes what the query builder produces, and the API
//! crate uses the filter parsing and error types to validate requests.

pub mod error;
pub mod filter;
pub mod pagination;
pub mod product;
pub mod query;
pub mod types;

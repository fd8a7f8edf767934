//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Pooled connections held only for the duration of one request
//! - Check-then-write sequences run inside one transaction
//! - Post reads JOIN the author in the same query (no N+1)
//! - Unique constraints back up the explicit uniqueness checks

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use error::DbError;
pub use pool::{create_memory_pool, create_pool, create_pool_with_options};
pub use repos::*;

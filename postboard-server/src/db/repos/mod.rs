//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the pool; one repo per request
//! - Multi-step writes run in a transaction that rolls back on drop
//! - Post reads always carry their author

pub mod posts;
pub mod users;

pub use posts::{Post, PostRepo};
pub use users::{User, UserRepo};

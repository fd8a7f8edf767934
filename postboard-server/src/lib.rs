//! postboard-server: HTTP server for users and posts
//!
//! Serves a JSON API under `/api` and server-rendered pages for browsers,
//! both backed by one SQLite store.

pub mod db;
pub mod http;
pub mod state;
pub mod templates;

pub use db::DbError;
pub use http::{build_router, run_server, ServerConfig, ServerError};
pub use state::AppState;

//! HTTP server layer
//!
//! Axum server with:
//! - JSON API under /api, rendered pages everywhere else
//! - Static and media file serving
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::{ApiError, PageError, Surface};
pub use server::{build_router, run_server, ServerConfig, ServerError};

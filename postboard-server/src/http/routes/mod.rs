//! Route handlers organized by resource

pub mod health;
pub mod pages;
pub mod posts;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Everything mounted under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(posts::router())
}

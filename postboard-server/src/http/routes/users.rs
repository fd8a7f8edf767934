//! User endpoints under /api/users

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use postboard_core::{NewUser, UserChanges};

use super::posts::{to_responses, PostResponse};
use crate::db::{PostRepo, User, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiPath};
use crate::state::AppState;

/// Create user request
#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
}

/// Partial update request; absent or null fields are left alone
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image_file: Option<String>,
}

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub image_file: Option<String>,
    pub image_path: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        let image_path = u.image_path();
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            image_file: u.image_file,
            image_path,
        }
    }
}

/// POST /users - create a user with a free username and email
async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UserCreate>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let new_user = NewUser::new(&req.username, &req.email).map_err(ApiError::body_validation)?;
    let user = UserRepo::new(state.pool()).create(new_user).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepo::new(state.pool()).get(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PATCH /users/{id} - change only the supplied fields
async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UserUpdate>,
) -> Result<Json<UserResponse>, ApiError> {
    let changes = UserChanges::new(
        req.username.as_deref(),
        req.email.as_deref(),
        req.image_file.as_deref(),
    )
    .map_err(ApiError::body_validation)?;

    let user = UserRepo::new(state.pool()).update(id, changes).await?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/{id}
async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    UserRepo::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/{id}/posts - everything one user has posted
async fn list_user_posts(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = PostRepo::new(state.pool()).list_by_user(id).await?;
    Ok(Json(to_responses(posts)))
}

/// User routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/users/{id}/posts", get(list_user_posts))
}

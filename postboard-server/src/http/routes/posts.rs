//! Post endpoints under /api/posts

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use postboard_core::{NewPost, PostChanges};

use super::users::UserResponse;
use crate::db::{Post, PostRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiPath};
use crate::state::AppState;

/// Create (POST) and full replace (PUT) request
#[derive(Debug, Deserialize)]
pub struct PostCreate {
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

impl PostCreate {
    fn validate(&self) -> Result<NewPost, ApiError> {
        NewPost::new(&self.title, &self.content, self.user_id).map_err(ApiError::body_validation)
    }
}

/// Partial update request; absent or null fields are left alone
#[derive(Debug, Default, Deserialize)]
pub struct PostUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Post response, author resolved
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub date_posted: String,
    pub author: UserResponse,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            user_id: p.user_id,
            date_posted: p.date_posted.to_rfc3339(),
            author: UserResponse::from(p.author),
        }
    }
}

pub(crate) fn to_responses(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(PostResponse::from).collect()
}

/// GET /posts - all posts, newest first
async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = PostRepo::new(state.pool()).list().await?;
    Ok(Json(to_responses(posts)))
}

/// POST /posts - create a post for an existing user
async fn create_post(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<PostCreate>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let new_post = req.validate()?;
    let post = PostRepo::new(state.pool()).create(new_post).await?;
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// GET /posts/{id}
async fn get_post(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = PostRepo::new(state.pool()).get(id).await?;
    Ok(Json(PostResponse::from(post)))
}

/// PUT /posts/{id} - replace title, content and owner
async fn replace_post(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<PostCreate>,
) -> Result<Json<PostResponse>, ApiError> {
    let data = req.validate()?;
    let post = PostRepo::new(state.pool()).replace(id, data).await?;
    Ok(Json(PostResponse::from(post)))
}

/// PATCH /posts/{id} - change only the supplied fields
async fn update_post(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<PostUpdate>,
) -> Result<Json<PostResponse>, ApiError> {
    let changes = PostChanges::new(req.title.as_deref(), req.content.as_deref(), req.user_id)
        .map_err(ApiError::body_validation)?;
    let post = PostRepo::new(state.pool()).update(id, changes).await?;
    Ok(Json(PostResponse::from(post)))
}

/// DELETE /posts/{id}
async fn delete_post(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    PostRepo::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Post routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post)
                .put(replace_post)
                .patch(update_post)
                .delete(delete_post),
        )
}

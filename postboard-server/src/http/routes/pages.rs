//! Browser-facing pages rendered from the same store as the API

use axum::{extract::State, response::Html, routing::get, Router};
use minijinja::context;
use serde::Serialize;

use postboard_core::display::{format_date, truncate_title};

use crate::db::{Post, PostRepo, User, UserRepo};
use crate::http::error::PageError;
use crate::http::extractors::PagePath;
use crate::state::AppState;
use crate::templates;

/// Author as shown on a page
#[derive(Serialize)]
struct AuthorView {
    id: i64,
    username: String,
    image_path: String,
}

impl From<&User> for AuthorView {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            image_path: u.image_path(),
        }
    }
}

/// Post as shown on a page
#[derive(Serialize)]
struct PostView {
    id: i64,
    title: String,
    content: String,
    date_posted: String,
    author: AuthorView,
}

impl From<&Post> for PostView {
    fn from(p: &Post) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            content: p.content.clone(),
            date_posted: format_date(&p.date_posted),
            author: AuthorView::from(&p.author),
        }
    }
}

fn views(posts: &[Post]) -> Vec<PostView> {
    posts.iter().map(PostView::from).collect()
}

/// GET / and /posts - every post, newest first
async fn home(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let posts = PostRepo::new(state.pool()).list().await?;
    let body = templates::render(
        "home.html",
        context! { title => "Home", posts => views(&posts) },
    )?;
    Ok(Html(body))
}

/// GET /posts/{id} - one post; the page title is cut to 55 characters
async fn post_page(
    State(state): State<AppState>,
    PagePath(id): PagePath<i64>,
) -> Result<Html<String>, PageError> {
    let post = PostRepo::new(state.pool()).get(id).await?;
    let body = templates::render(
        "post.html",
        context! { title => truncate_title(&post.title), post => PostView::from(&post) },
    )?;
    Ok(Html(body))
}

/// GET /users/{id}/posts - one user's posts
async fn user_posts_page(
    State(state): State<AppState>,
    PagePath(id): PagePath<i64>,
) -> Result<Html<String>, PageError> {
    let user = UserRepo::new(state.pool()).get(id).await?;
    let posts = PostRepo::new(state.pool()).list_by_user(id).await?;
    let body = templates::render(
        "user_posts.html",
        context! {
            title => format!("{}'s Posts", user.username),
            user => AuthorView::from(&user),
            posts => views(&posts),
        },
    )?;
    Ok(Html(body))
}

/// Page routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/posts", get(home))
        .route("/posts/{id}", get(post_page))
        .route("/users/{id}/posts", get(user_posts_page))
}

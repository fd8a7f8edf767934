//! Error translation for both response surfaces
//!
//! Requests under `/api` get JSON `{"detail": ...}` payloads; every other
//! path gets the rendered error page. Both carry the same status code.

use axum::extract::OriginalUri;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use minijinja::context;
use serde::Serialize;
use serde_json::json;

use postboard_core::ValidationError;

use crate::db::DbError;
use crate::templates;

/// Path prefix reserved for the JSON API
pub const API_PREFIX: &str = "/api";

/// Page message when an error carries no detail of its own
pub const GENERIC_MESSAGE: &str = "An error occured. Try again!";

/// Page message for any request validation failure
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request. Try again!";

/// Which kind of client a response is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Api,
    Page,
}

impl Surface {
    /// `/api` and everything below it is the API; the rest are pages.
    pub fn for_path(path: &str) -> Self {
        match path.strip_prefix(API_PREFIX) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => Self::Api,
            _ => Self::Page,
        }
    }
}

/// One entry of a 422 error list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|s| (*s).to_owned()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    /// A domain validation failure on a request body field.
    pub fn body(err: &ValidationError) -> Self {
        Self::new(&["body", err.field()], err.to_string(), err.kind())
    }
}

/// What goes into `detail`
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Detail {
    Message(String),
    Fields(Vec<FieldError>),
}

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body or parameters failed validation (422)
    Validation(Vec<FieldError>),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Unique field already taken (400)
    Conflict { message: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    /// Domain validation failures on body fields.
    pub fn body_validation(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors.iter().map(FieldError::body).collect())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> Detail {
        match self {
            Self::Validation(fields) => Detail::Fields(fields.clone()),
            Self::NotFound { resource, id } => {
                Detail::Message(format!("{} '{}' not found", capitalize(resource), id))
            }
            Self::Conflict { message } => Detail::Message(message.clone()),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                Detail::Message("an internal error occurred".into())
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                Detail::Message("an internal error occurred".into())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        translate(Surface::Api, self.status(), self.detail())
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound {
                resource,
                id: id.to_string(),
            },
            DbError::Conflict { field } => Self::Conflict {
                message: format!("{} already exists", capitalize(field)),
            },
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}

impl From<minijinja::Error> for ApiError {
    fn from(e: minijinja::Error) -> Self {
        Self::Internal {
            message: format!("template error: {:#}", e),
        }
    }
}

/// The same failures as [`ApiError`], rendered as an HTML page.
#[derive(Debug)]
pub struct PageError(pub ApiError);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        translate(Surface::Page, self.0.status(), self.0.detail())
    }
}

impl From<ApiError> for PageError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl From<DbError> for PageError {
    fn from(e: DbError) -> Self {
        Self(ApiError::from(e))
    }
}

impl From<minijinja::Error> for PageError {
    fn from(e: minijinja::Error) -> Self {
        Self(ApiError::from(e))
    }
}

/// Shape a failure for the given surface.
pub fn translate(surface: Surface, status: StatusCode, detail: Detail) -> Response {
    match surface {
        Surface::Api => (status, Json(json!({ "detail": detail }))).into_response(),
        Surface::Page => {
            let message = match detail {
                Detail::Fields(_) => INVALID_REQUEST_MESSAGE.to_owned(),
                Detail::Message(m) if !m.is_empty() => m,
                Detail::Message(_) => GENERIC_MESSAGE.to_owned(),
            };
            error_page(status, &message)
        }
    }
}

/// Render `error.html`, degrading to plain text if the template fails.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    let code = status.as_u16();
    match templates::render(
        "error.html",
        context! { title => code, status_code => code, message => message },
    ) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {:#}", e);
            (status, message.to_owned()).into_response()
        }
    }
}

/// Router fallback: unmatched paths, answered on the surface their path implies.
pub async fn fallback(OriginalUri(uri): OriginalUri) -> Response {
    tracing::debug!(path = %uri.path(), "no route");
    translate(
        Surface::for_path(uri.path()),
        StatusCode::NOT_FOUND,
        Detail::Message("Not Found".into()),
    )
}

/// Known path, unsupported method: same split as [`fallback`].
pub async fn method_not_allowed(OriginalUri(uri): OriginalUri) -> Response {
    translate(
        Surface::for_path(uri.path()),
        StatusCode::METHOD_NOT_ALLOWED,
        Detail::Message("Method Not Allowed".into()),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

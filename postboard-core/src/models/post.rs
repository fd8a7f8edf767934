//! Post title/content validation and write commands

use super::validation::{check_length, collect_errors, ValidationError};

/// Maximum length for post titles
pub const MAX_TITLE_LEN: usize = 100;

/// Upper bound on post bodies; keeps a single row reasonable
pub const MAX_CONTENT_LEN: usize = 100_000;

/// Validated post title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check_length("title", s, MAX_TITLE_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated post body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check_length("content", s, MAX_CONTENT_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Everything needed to create a post, or to replace one wholesale
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: PostTitle,
    pub content: PostContent,
    pub user_id: i64,
}

impl NewPost {
    pub fn new(title: &str, content: &str, user_id: i64) -> Result<Self, Vec<ValidationError>> {
        match (PostTitle::new(title), PostContent::new(content)) {
            (Ok(title), Ok(content)) => Ok(Self {
                title,
                content,
                user_id,
            }),
            (title, content) => Err(collect_errors([title.err(), content.err()])),
        }
    }
}

/// Partial post update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<PostTitle>,
    pub content: Option<PostContent>,
    pub user_id: Option<i64>,
}

impl PostChanges {
    pub fn new(
        title: Option<&str>,
        content: Option<&str>,
        user_id: Option<i64>,
    ) -> Result<Self, Vec<ValidationError>> {
        let title = title.map(PostTitle::new).transpose();
        let content = content.map(PostContent::new).transpose();

        match (title, content) {
            (Ok(title), Ok(content)) => Ok(Self {
                title,
                content,
                user_id,
            }),
            (title, content) => Err(collect_errors([title.err(), content.err()])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.user_id.is_none()
    }
}

//! Post repository
//!
//! Every read joins the owning user so callers always get a resolved
//! author. Listings are newest first.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqliteConnection, SqlitePool};

use postboard_core::{NewPost, PostChanges};

use super::users::{user_exists, User};
use crate::db::DbError;

/// Post record joined with its author
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
    pub user_id: i64,
    pub author: User,
}

impl Post {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let user_id: i64 = row.try_get("user_id")?;
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            date_posted: row.try_get("date_posted")?,
            user_id,
            author: User {
                id: user_id,
                username: row.try_get("author_username")?,
                email: row.try_get("author_email")?,
                image_file: row.try_get("author_image_file")?,
            },
        })
    }
}

const SELECT_POSTS: &str = r#"
    SELECT
        p.id,
        p.title,
        p.content,
        p.date_posted,
        p.user_id,
        u.username AS author_username,
        u.email AS author_email,
        u.image_file AS author_image_file
    FROM posts p
    JOIN users u ON u.id = p.user_id
"#;

const NEWEST_FIRST: &str = "ORDER BY p.date_posted DESC, p.id DESC";

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All posts, newest first.
    pub async fn list(&self) -> Result<Vec<Post>, DbError> {
        let sql = format!("{SELECT_POSTS} {NEWEST_FIRST}");
        let rows = sqlx::query(&sql).fetch_all(self.pool).await?;
        Ok(rows.iter().map(Post::from_row).collect::<Result<_, _>>()?)
    }

    /// Posts owned by one user, newest first. The user must exist.
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Post>, DbError> {
        let mut conn = self.pool.acquire().await?;

        if !user_exists(&mut conn, user_id).await? {
            return Err(DbError::user_not_found(user_id));
        }

        let sql = format!("{SELECT_POSTS} WHERE p.user_id = ? {NEWEST_FIRST}");
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.iter().map(Post::from_row).collect::<Result<_, _>>()?)
    }

    /// Get a single post with its author.
    pub async fn get(&self, id: i64) -> Result<Post, DbError> {
        fetch_post(self.pool, id)
            .await?
            .ok_or_else(|| DbError::post_not_found(id))
    }

    /// Create a post owned by an existing user.
    pub async fn create(&self, new_post: NewPost) -> Result<Post, DbError> {
        let mut tx = self.pool.begin().await?;

        if !user_exists(&mut tx, new_post.user_id).await? {
            return Err(DbError::user_not_found(new_post.user_id));
        }

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO posts (title, content, date_posted, user_id)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(new_post.title.as_str())
        .bind(new_post.content.as_str())
        .bind(Utc::now())
        .bind(new_post.user_id)
        .fetch_one(&mut *tx)
        .await?;

        let post = reload(&mut tx, id).await?;
        tx.commit().await?;
        tracing::info!(post_id = id, user_id = post.user_id, "post created");
        Ok(post)
    }

    /// Overwrite title, content and owner of an existing post.
    pub async fn replace(&self, id: i64, data: NewPost) -> Result<Post, DbError> {
        let mut tx = self.pool.begin().await?;

        let current_owner = fetch_owner(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::post_not_found(id))?;

        if data.user_id != current_owner && !user_exists(&mut tx, data.user_id).await? {
            return Err(DbError::user_not_found(data.user_id));
        }

        sqlx::query("UPDATE posts SET title = ?, content = ?, user_id = ? WHERE id = ?")
            .bind(data.title.as_str())
            .bind(data.content.as_str())
            .bind(data.user_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let post = reload(&mut tx, id).await?;
        tx.commit().await?;
        tracing::info!(post_id = id, "post replaced");
        Ok(post)
    }

    /// Apply only the supplied fields to an existing post.
    pub async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, DbError> {
        let mut tx = self.pool.begin().await?;

        let current_owner = fetch_owner(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::post_not_found(id))?;

        if let Some(user_id) = changes.user_id {
            if user_id != current_owner && !user_exists(&mut tx, user_id).await? {
                return Err(DbError::user_not_found(user_id));
            }
        }

        if !changes.is_empty() {
            sqlx::query(
                r#"
                UPDATE posts SET
                    title = COALESCE(?, title),
                    content = COALESCE(?, content),
                    user_id = COALESCE(?, user_id)
                WHERE id = ?
                "#,
            )
            .bind(changes.title.as_ref().map(|t| t.as_str()))
            .bind(changes.content.as_ref().map(|c| c.as_str()))
            .bind(changes.user_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let post = reload(&mut tx, id).await?;
        tx.commit().await?;
        tracing::debug!(post_id = id, "post updated");
        Ok(post)
    }

    /// Delete a post.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::post_not_found(id));
        }
        tracing::info!(post_id = id, "post deleted");
        Ok(())
    }
}

async fn fetch_post<'e, E>(executor: E, id: i64) -> Result<Option<Post>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{SELECT_POSTS} WHERE p.id = ?");
    let row = sqlx::query(&sql).bind(id).fetch_optional(executor).await?;
    row.as_ref().map(Post::from_row).transpose()
}

/// Re-read a post just written in this transaction, author included.
async fn reload(conn: &mut SqliteConnection, id: i64) -> Result<Post, DbError> {
    fetch_post(conn, id)
        .await?
        .ok_or_else(|| DbError::post_not_found(id))
}

async fn fetch_owner(conn: &mut SqliteConnection, id: i64) -> Result<Option<i64>, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT user_id FROM posts WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row.map(|(user_id,)| user_id))
}

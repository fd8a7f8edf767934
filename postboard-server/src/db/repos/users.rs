//! User repository
//!
//! Username and email uniqueness is checked inside the write transaction
//! before inserting or updating; the UNIQUE constraints catch racing writers.

use serde::Serialize;
use sqlx::{FromRow, SqliteConnection, SqlitePool};

use postboard_core::{NewUser, UserChanges};

use crate::db::DbError;

/// Where uploaded profile pictures are served from
pub const PROFILE_PICS_URL: &str = "/media/profile_pics";

/// Picture shown for users without an upload
pub const DEFAULT_PROFILE_PIC: &str = "/static/profile_pics/default.svg";

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub image_file: Option<String>,
}

impl User {
    /// Public URL of the user's profile picture.
    pub fn image_path(&self) -> String {
        match &self.image_file {
            Some(file) => format!("{}/{}", PROFILE_PICS_URL, file),
            None => DEFAULT_PROFILE_PIC.to_string(),
        }
    }
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a single user by id.
    pub async fn get(&self, id: i64) -> Result<User, DbError> {
        sqlx::query_as::<_, User>("SELECT id, username, email, image_file FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::user_not_found(id))
    }

    /// Create a user after checking username, then email, are free.
    pub async fn create(&self, new_user: NewUser) -> Result<User, DbError> {
        let mut tx = self.pool.begin().await?;

        if username_taken(&mut tx, new_user.username.as_str(), None).await? {
            return Err(DbError::Conflict { field: "username" });
        }
        if email_taken(&mut tx, new_user.email.as_str(), None).await? {
            return Err(DbError::Conflict { field: "email" });
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email) VALUES (?, ?)
            RETURNING id, username, email, image_file
            "#,
        )
        .bind(new_user.username.as_str())
        .bind(new_user.email.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(DbError::from_write)?;

        tx.commit().await?;
        tracing::info!(user_id = user.id, username = %user.username, "user created");
        Ok(user)
    }

    /// Apply the supplied fields to an existing user.
    ///
    /// A new username or email conflicts only when a *different* user
    /// already holds it.
    pub async fn update(&self, id: i64, changes: UserChanges) -> Result<User, DbError> {
        let mut tx = self.pool.begin().await?;

        let mut user = fetch_user(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::user_not_found(id))?;

        if changes.is_empty() {
            return Ok(user);
        }

        if let Some(username) = &changes.username {
            if username.as_str() != user.username
                && username_taken(&mut tx, username.as_str(), Some(id)).await?
            {
                return Err(DbError::Conflict { field: "username" });
            }
        }
        if let Some(email) = &changes.email {
            if email_taken(&mut tx, email.as_str(), Some(id)).await? {
                return Err(DbError::Conflict { field: "email" });
            }
        }

        if let Some(username) = changes.username {
            user.username = username.into_string();
        }
        if let Some(email) = changes.email {
            user.email = email.into_string();
        }
        if let Some(image_file) = changes.image_file {
            user.image_file = Some(image_file.into_string());
        }

        sqlx::query("UPDATE users SET username = ?, email = ?, image_file = ? WHERE id = ?")
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.image_file)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from_write)?;

        tx.commit().await?;
        tracing::info!(user_id = id, "user updated");
        Ok(user)
    }

    /// Delete a user together with the posts they own.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        if fetch_user(&mut tx, id).await?.is_none() {
            return Err(DbError::user_not_found(id));
        }

        let posts = sqlx::query("DELETE FROM posts WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(
            user_id = id,
            posts_removed = posts.rows_affected(),
            "user deleted"
        );
        Ok(())
    }
}

pub(crate) async fn fetch_user(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, username, email, image_file FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub(crate) async fn user_exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

/// Is `username` held by a user other than `except`?
async fn username_taken(
    conn: &mut SqliteConnection,
    username: &str,
    except: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM users WHERE username = ?1 AND (?2 IS NULL OR id != ?2)")
            .bind(username)
            .bind(except)
            .fetch_optional(conn)
            .await?;
    Ok(row.is_some())
}

/// Is `email` held by a user other than `except`?
async fn email_taken(
    conn: &mut SqliteConnection,
    email: &str,
    except: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM users WHERE email = ?1 AND (?2 IS NULL OR id != ?2)")
            .bind(email)
            .bind(except)
            .fetch_optional(conn)
            .await?;
    Ok(row.is_some())
}

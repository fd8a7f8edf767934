//! Store error type

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: i64 },

    /// A unique field is already held by another row
    #[error("{field} already exists")]
    Conflict { field: &'static str },
}

impl DbError {
    pub(crate) fn user_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "user",
            id,
        }
    }

    pub(crate) fn post_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "post",
            id,
        }
    }

    /// Translate a unique-constraint violation on `users` into a Conflict.
    ///
    /// Only reached when two writers race past the explicit checks.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let field = if db_err.message().contains("users.email") {
                    "email"
                } else {
                    "username"
                };
                return Self::Conflict { field };
            }
        }
        Self::Sqlx(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(DbError::user_not_found(7).to_string(), "user '7' not found");
        assert_eq!(
            DbError::Conflict { field: "email" }.to_string(),
            "email already exists"
        );
    }

    #[test]
    fn non_unique_errors_pass_through() {
        let err = DbError::from_write(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(sqlx::Error::RowNotFound)));
    }
}

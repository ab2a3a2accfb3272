use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: Uuid,                   // assigned by the store
    pub name: String,
    pub email: String,              // unique, stored lower-case
    pub created_at: OffsetDateTime, // set once on insert
}

/// Failure of a single store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {}", .messages.join(", "))]
    Validation { messages: Vec<String> },

    #[error("duplicate value for `{field}`")]
    Conflict { field: String },

    #[error("record not found")]
    NotFound,

    #[error("store unreachable: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("store error: {0}")]
    Unknown(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        if let sqlx::Error::Database(db) = &e {
            let field = constraint_field(db.constraint());
            match db.kind() {
                ErrorKind::UniqueViolation => return StoreError::Conflict { field },
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    return StoreError::Validation {
                        messages: vec![required_message(&field)],
                    }
                }
                _ => {}
            }
        }

        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Connection(e),
            _ => StoreError::Unknown(e),
        }
    }
}

/// Maps a constraint name such as `users_email_key` to its column (`email`).
pub(crate) fn constraint_field(constraint: Option<&str>) -> String {
    constraint
        .and_then(|c| c.strip_prefix("users_"))
        .filter(|rest| *rest != "pkey")
        .map(|rest| {
            rest.trim_end_matches("_key")
                .trim_end_matches("_check")
                .trim_end_matches("_not_null")
                .to_string()
        })
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| "record".into())
}

pub(crate) fn required_message(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!("{}{} is required", first.to_uppercase(), chars.as_str()),
        None => "Field is required".into(),
    }
}

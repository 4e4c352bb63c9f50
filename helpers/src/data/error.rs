//! Unified error type for data layer
//!
//! Wraps the engine errors raised while executing rendered queries. Engine
//! errors are carried unmodified so callers can inspect them.

use thiserror::Error;

/// Unified error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// PostgreSQL database error
    #[error("PostgreSQL error: {0}")]
    Postgres(sqlx::Error),

    /// A fetched row could not be decoded into the requested type
    #[error("Row decode error: {0}")]
    Decode(sqlx::Error),

    /// COUNT(*) came back negative
    #[error("Count query returned invalid value {0}")]
    InvalidCount(i64),
}

impl DataError {
    /// Create a SQLite error with preserved context
    pub fn from_sqlite(e: sqlx::Error) -> Self {
        Self::Sqlite(e)
    }

    /// Create a PostgreSQL error with preserved context
    pub fn from_postgres(e: sqlx::Error) -> Self {
        Self::Postgres(e)
    }

    /// Get the backend name that generated this error, if any
    pub fn backend(&self) -> Option<&'static str> {
        match self {
            Self::Sqlite(_) => Some("sqlite"),
            Self::Postgres(_) => Some("postgres"),
            Self::Decode(_) | Self::InvalidCount(_) => None,
        }
    }
}

//! Data layer
//!
//! - `query` - Composable select queries and predicate expressions
//! - `sql` - SQL dialects for rendering queries per backend
//! - `executor` - Execution seam used by pagination
//! - `sqlite` / `postgres` - `sqlx` executors
//! - `error` - Unified error type for all backends

pub mod error;
pub mod executor;
pub mod postgres;
pub mod query;
pub mod sql;
pub mod sqlite;

pub use error::DataError;
pub use executor::QueryExecutor;
pub use postgres::PostgresExecutor;
pub use sqlite::SqliteExecutor;

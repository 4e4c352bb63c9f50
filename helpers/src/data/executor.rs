//! Query execution seam
//!
//! Filters and pagination only compose [`SelectQuery`] values. Running them is
//! delegated to a [`QueryExecutor`], implemented per backend on `sqlx` pools.

use async_trait::async_trait;

use super::error::DataError;
use super::query::SelectQuery;
use super::sql::SqlDialect;

/// Runs rendered select queries against a database
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Row type produced by the backend
    type Row: sqlx::Row;

    /// Dialect used to render queries for this backend
    fn dialect(&self) -> &'static dyn SqlDialect;

    /// Count the rows matched by `query`, ignoring its window
    async fn count(&self, query: &SelectQuery) -> Result<u64, DataError>;

    /// Fetch all rows matched by `query`, honoring its window
    async fn fetch_all(&self, query: &SelectQuery) -> Result<Vec<Self::Row>, DataError>;
}

//! SQLite query executor

use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::SqliteRow;
use sqlx::{Database, Row, Sqlite, SqlitePool};

use super::error::DataError;
use super::executor::QueryExecutor;
use super::query::{SelectQuery, SqlValue};
use super::sql::{SqlDialect, SqliteDialect};

type SqliteQuery<'q> = Query<'q, Sqlite, <Sqlite as Database>::Arguments<'q>>;

/// Executes select queries on a SQLite pool
#[derive(Debug, Clone)]
pub struct SqliteExecutor {
    pool: SqlitePool,
}

impl SqliteExecutor {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl QueryExecutor for SqliteExecutor {
    type Row = SqliteRow;

    fn dialect(&self) -> &'static dyn SqlDialect {
        &SqliteDialect
    }

    async fn count(&self, query: &SelectQuery) -> Result<u64, DataError> {
        let (sql, params) = query.count_sql(self.dialect());
        tracing::trace!(sql = %sql, params = params.len(), "SQLite count");

        let row = bind_params(sqlx::query(&sql), &params.values)
            .fetch_one(&self.pool)
            .await
            .map_err(DataError::from_sqlite)?;
        let total: i64 = row.try_get(0).map_err(DataError::Decode)?;
        u64::try_from(total).map_err(|_| DataError::InvalidCount(total))
    }

    async fn fetch_all(&self, query: &SelectQuery) -> Result<Vec<SqliteRow>, DataError> {
        let (sql, params) = query.to_sql(self.dialect());
        tracing::trace!(sql = %sql, params = params.len(), "SQLite select");

        bind_params(sqlx::query(&sql), &params.values)
            .fetch_all(&self.pool)
            .await
            .map_err(DataError::from_sqlite)
    }
}

fn bind_params<'q>(mut query: SqliteQuery<'q>, params: &'q [SqlValue]) -> SqliteQuery<'q> {
    for value in params {
        query = match value {
            SqlValue::Null => query.bind(None::<String>),
            SqlValue::Bool(b) => query.bind(*b),
            SqlValue::Int(i) => query.bind(*i),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}

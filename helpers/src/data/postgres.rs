//! PostgreSQL query executor

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::query::Query;
use sqlx::{Database, PgPool, Postgres, Row};

use super::error::DataError;
use super::executor::QueryExecutor;
use super::query::{SelectQuery, SqlValue};
use super::sql::{PostgresDialect, SqlDialect};

type PgQuery<'q> = Query<'q, Postgres, <Postgres as Database>::Arguments<'q>>;

/// Executes select queries on a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PostgresExecutor {
    pool: PgPool,
}

impl PostgresExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl QueryExecutor for PostgresExecutor {
    type Row = PgRow;

    fn dialect(&self) -> &'static dyn SqlDialect {
        &PostgresDialect
    }

    async fn count(&self, query: &SelectQuery) -> Result<u64, DataError> {
        let (sql, params) = query.count_sql(self.dialect());
        tracing::trace!(sql = %sql, params = params.len(), "PostgreSQL count");

        let row = bind_params(sqlx::query(&sql), &params.values)
            .fetch_one(&self.pool)
            .await
            .map_err(DataError::from_postgres)?;
        let total: i64 = row.try_get(0).map_err(DataError::Decode)?;
        u64::try_from(total).map_err(|_| DataError::InvalidCount(total))
    }

    async fn fetch_all(&self, query: &SelectQuery) -> Result<Vec<PgRow>, DataError> {
        let (sql, params) = query.to_sql(self.dialect());
        tracing::trace!(sql = %sql, params = params.len(), "PostgreSQL select");

        bind_params(sqlx::query(&sql), &params.values)
            .fetch_all(&self.pool)
            .await
            .map_err(DataError::from_postgres)
    }
}

fn bind_params<'q>(mut query: PgQuery<'q>, params: &'q [SqlValue]) -> PgQuery<'q> {
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

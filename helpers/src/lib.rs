//! Declarative request filters and paginated query results on `sqlx`
//!
//! - `filters` - Map request arguments to predicates through a [`FilterConfig`]
//! - `pagination` - Count and fetch one page window of a query
//! - `data` - Select queries, SQL dialects and per-backend executors
//! - `api` - axum extractor and error responses
//! - `core` - Pagination configuration
//!
//! ```ignore
//! let config = FilterConfig::new()
//!     .field("name", FieldConfig::new(people.column("name")).lookup(Lookup::Ilike))
//!     .field("min_age", FieldConfig::new(people.column("age")).lookup(Lookup::Ge));
//! let query = build_filtered_query(SelectQuery::new(people), &arguments, &config, &[], true)?;
//! let page: Page<Person> = paginate(&executor, &query, 1, 10).await?;
//! ```

pub mod api;
pub mod core;
pub mod data;
pub mod filters;
pub mod pagination;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use crate::core::PaginationConfig;
pub use data::query::{Column, Entity, Join, SelectQuery};
pub use data::{DataError, PostgresExecutor, QueryExecutor, SqliteExecutor};
pub use filters::{
    Arguments, FieldConfig, FilterConfig, FilterEntry, FilterError, Lookup, Relation, Wrapper,
    build_filtered_query, build_predicate, build_predicate_str,
};
pub use pagination::{Page, PageArgs, PageError, paginate, paginate_with};

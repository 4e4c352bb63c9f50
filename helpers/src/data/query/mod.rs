//! Composable query model
//!
//! A small select-query representation that filters and pagination build on.
//! Nothing here touches a database: queries render to SQL text plus bound
//! parameters through a [`SqlDialect`](crate::data::sql::SqlDialect), and an
//! executor runs them.

mod column;
mod params;
mod predicate;
mod select;

pub use column::{AliasedTable, Column, Entity, Join};
pub use params::{SqlParams, SqlValue};
pub use predicate::{CompareOp, MatchAnchor, Predicate};
pub use select::{OrderBy, OrderDirection, SelectQuery};

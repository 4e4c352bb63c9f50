//! SQL abstraction layer for multi-database support
//!
//! Query rendering goes through [`SqlDialect`] so the same filtered query can
//! run on SQLite and PostgreSQL.

mod dialect;
mod postgres_dialect;
mod sqlite_dialect;

pub use dialect::SqlDialect;
pub use postgres_dialect::PostgresDialect;
pub use sqlite_dialect::SqliteDialect;

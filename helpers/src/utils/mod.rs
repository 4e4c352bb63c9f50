//! Shared utilities

pub mod sql;

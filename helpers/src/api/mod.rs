//! HTTP surface for axum handlers

pub mod extractors;
pub mod types;

pub use extractors::{PageParams, PageQueryRejection, PaginatedQuery};
pub use types::ApiError;

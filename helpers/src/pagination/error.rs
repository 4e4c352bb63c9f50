//! Pagination errors

use serde_json::Value;
use thiserror::Error;

use crate::data::DataError;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Page size must be at least 1")]
    InvalidPageSize,

    #[error("Page must be at least 1")]
    InvalidPage,

    /// Offset of the requested page does not fit the query window
    #[error("Page {page} with size {size} is out of range")]
    PageOutOfRange { page: u32, size: u32 },

    /// `page` or `size` argument is neither an integer nor a numeric string
    #[error("Invalid value for '{key}': {value}")]
    InvalidArgument { key: String, value: Value },

    #[error(transparent)]
    Data(#[from] DataError),
}

impl PageError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPageSize => "INVALID_PAGE_SIZE",
            Self::InvalidPage => "INVALID_PAGE",
            Self::PageOutOfRange { .. } => "PAGE_OUT_OF_RANGE",
            Self::InvalidArgument { .. } => "INVALID_PAGE_ARGUMENT",
            Self::Data(_) => "INTERNAL",
        }
    }

    /// True when the caller supplied bad paging input
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Data(_))
    }
}

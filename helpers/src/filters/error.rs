//! Filter construction errors

use thiserror::Error;

use super::types::Lookup;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Lookup string outside the supported set
    #[error("Unsupported lookup kind: {0}")]
    UnsupportedLookup(String),

    /// Membership lookups need an array value
    #[error("Lookup '{lookup}' expects a list value")]
    ExpectedList { lookup: Lookup },

    /// Comparison and pattern lookups need a scalar value
    #[error("Lookup '{lookup}' expects a scalar value")]
    ExpectedScalar { lookup: Lookup },

    #[error("Invalid filter arguments: {0}")]
    InvalidArguments(String),

    #[error("Filter arguments exceed maximum size of {max_bytes} bytes")]
    ArgumentsTooLarge { max_bytes: usize },

    #[error("Maximum {max} filter arguments allowed")]
    TooManyArguments { max: usize },
}

impl FilterError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedLookup(_) => "UNSUPPORTED_LOOKUP",
            Self::ExpectedList { .. } => "FILTER_EXPECTED_LIST",
            Self::ExpectedScalar { .. } => "FILTER_EXPECTED_SCALAR",
            Self::InvalidArguments(_) => "INVALID_FILTER_JSON",
            Self::ArgumentsTooLarge { .. } => "FILTER_JSON_TOO_LARGE",
            Self::TooManyArguments { .. } => "TOO_MANY_FILTERS",
        }
    }
}

//! Declarative request filters
//!
//! A [`FilterConfig`] describes which argument keys filter which columns and
//! how. [`build_filtered_query`] applies the present arguments to a query.

mod arguments;
mod builder;
mod error;
mod relation;
mod types;

pub use arguments::{Arguments, arguments_from, is_truthy, parse_arguments, present_argument};
pub use builder::{build_filtered_query, build_predicate, build_predicate_str};
pub use error::FilterError;
pub use relation::Relation;
pub use types::{FieldConfig, FilterConfig, FilterEntry, Lookup, Wrapper};

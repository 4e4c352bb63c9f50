//! SQL dialect trait for multi-database support
//!
//! This trait defines the interface for generating database-specific SQL syntax.

use crate::data::query::MatchAnchor;

/// SQL dialect trait for generating database-specific SQL
///
/// Different databases have different syntax for:
/// - Parameter placeholders (? vs $1)
/// - Array membership
/// - Case-sensitive and case-insensitive pattern matching
/// - Limit/offset clauses
pub trait SqlDialect: Send + Sync {
    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// Generate SQL for checking if an array contains a value
    ///
    /// - SQLite: `EXISTS (SELECT 1 FROM json_each(col) WHERE value = ?)`
    /// - PostgreSQL: `$1 = ANY(col)`
    fn array_contains(&self, array_col: &str, param_idx: usize) -> String;

    /// Generate SQL matching `col` against the pattern bound at `param_idx`
    ///
    /// The bound value must come from [`SqlDialect::encode_pattern`] with the
    /// same `case_insensitive` flag.
    fn pattern_match(&self, col: &str, param_idx: usize, case_insensitive: bool) -> String;

    /// Turn a literal search value into the bound pattern for
    /// [`SqlDialect::pattern_match`], escaping metacharacters.
    fn encode_pattern(&self, value: &str, anchor: MatchAnchor, case_insensitive: bool) -> String;

    /// Generate LIMIT/OFFSET clause
    ///
    /// Most databases use `LIMIT x OFFSET y`, but syntax may vary.
    fn limit_offset(&self, limit: Option<u32>, offset: Option<u32>) -> String {
        match (limit, offset) {
            (Some(limit), Some(offset)) => format!("LIMIT {} OFFSET {}", limit, offset),
            (Some(limit), None) => format!("LIMIT {}", limit),
            (None, Some(offset)) => format!("OFFSET {}", offset),
            (None, None) => String::new(),
        }
    }
}

/// Wrap an escaped pattern body in wildcards according to the anchor
pub(super) fn anchored(body: &str, anchor: MatchAnchor, wildcard: char) -> String {
    match anchor {
        MatchAnchor::Anywhere => format!("{wildcard}{body}{wildcard}"),
        MatchAnchor::Start => format!("{body}{wildcard}"),
        MatchAnchor::End => format!("{wildcard}{body}"),
    }
}

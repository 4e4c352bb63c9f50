//! PostgreSQL SQL dialect implementation

use super::SqlDialect;
use super::dialect::anchored;
use crate::data::query::MatchAnchor;
use crate::utils::sql::escape_like_pattern;

/// PostgreSQL SQL dialect
#[derive(Debug, Clone, Copy)]
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn array_contains(&self, array_col: &str, param_idx: usize) -> String {
        format!("${} = ANY({})", param_idx, array_col)
    }

    fn pattern_match(&self, col: &str, param_idx: usize, case_insensitive: bool) -> String {
        let op = if case_insensitive { "ILIKE" } else { "LIKE" };
        format!("{} {} ${} ESCAPE '\\'", col, op, param_idx)
    }

    fn encode_pattern(&self, value: &str, anchor: MatchAnchor, _case_insensitive: bool) -> String {
        anchored(&escape_like_pattern(value), anchor, '%')
    }
}

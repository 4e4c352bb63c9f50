//! SQLite SQL dialect implementation

use super::SqlDialect;
use super::dialect::anchored;
use crate::data::query::MatchAnchor;
use crate::utils::sql::{escape_glob_pattern, escape_like_pattern};

/// SQLite SQL dialect
///
/// SQLite's `LIKE` folds ASCII case, so case-sensitive matches use `GLOB`.
#[derive(Debug, Clone, Copy)]
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn array_contains(&self, array_col: &str, _param_idx: usize) -> String {
        // SQLite stores arrays as JSON text, use json_each to search
        format!(
            "EXISTS (SELECT 1 FROM json_each({}) WHERE value = ?)",
            array_col
        )
    }

    fn pattern_match(&self, col: &str, _param_idx: usize, case_insensitive: bool) -> String {
        if case_insensitive {
            format!("{} LIKE ? ESCAPE '\\'", col)
        } else {
            format!("{} GLOB ?", col)
        }
    }

    fn encode_pattern(&self, value: &str, anchor: MatchAnchor, case_insensitive: bool) -> String {
        if case_insensitive {
            anchored(&escape_like_pattern(value), anchor, '%')
        } else {
            anchored(&escape_glob_pattern(value), anchor, '*')
        }
    }

    fn limit_offset(&self, limit: Option<u32>, offset: Option<u32>) -> String {
        match (limit, offset) {
            // SQLite rejects OFFSET without LIMIT
            (None, Some(offset)) => format!("LIMIT -1 OFFSET {}", offset),
            (Some(limit), Some(offset)) => format!("LIMIT {} OFFSET {}", limit, offset),
            (Some(limit), None) => format!("LIMIT {}", limit),
            (None, None) => String::new(),
        }
    }
}

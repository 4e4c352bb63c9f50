//! Predicate expressions
//!
//! Predicates are plain data. Rendering binds every value as a parameter; only
//! column and table names are written into the SQL text.

use std::ops::Not;

use super::column::{AliasedTable, Column};
use super::params::{SqlParams, SqlValue};
use crate::data::sql::SqlDialect;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

/// Where a pattern match may occur within the column value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAnchor {
    /// Substring match
    Anywhere,
    /// Prefix match
    Start,
    /// Suffix match
    End,
}

/// Boolean predicate over a query's rows
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        column: Column,
        op: CompareOp,
        value: SqlValue,
    },
    /// Literal text match; metacharacters in `value` are escaped on render
    Match {
        column: Column,
        value: String,
        anchor: MatchAnchor,
        case_insensitive: bool,
    },
    InList {
        column: Column,
        values: Vec<SqlValue>,
        negated: bool,
    },
    /// Array column contains the element
    Contains {
        column: Column,
        value: SqlValue,
    },
    IsNull {
        column: Column,
        negated: bool,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    /// Correlated `EXISTS` over related tables
    Exists {
        tables: Vec<AliasedTable>,
        correlation: Vec<(Column, Column)>,
        predicate: Box<Predicate>,
    },
}

impl Predicate {
    /// Generate SQL WHERE clause fragment
    /// Returns the SQL with dialect placeholders and updates params
    pub fn to_sql(&self, dialect: &dyn SqlDialect, params: &mut SqlParams) -> String {
        match self {
            Self::Compare { column, op, value } => {
                let placeholder = params.push(value.clone(), dialect);
                format!("{} {} {}", column, op.as_sql(), placeholder)
            }
            Self::Match {
                column,
                value,
                anchor,
                case_insensitive,
            } => {
                let pattern = dialect.encode_pattern(value, *anchor, *case_insensitive);
                let idx = params.bind(SqlValue::Text(pattern));
                dialect.pattern_match(&column.to_string(), idx, *case_insensitive)
            }
            Self::InList {
                column,
                values,
                negated,
            } => {
                if values.is_empty() {
                    // Nothing is in an empty set
                    return if *negated { "1=1" } else { "1=0" }.to_string();
                }
                let placeholders: Vec<String> = values
                    .iter()
                    .map(|v| params.push(v.clone(), dialect))
                    .collect();
                let op = if *negated { "NOT IN" } else { "IN" };
                format!("{} {} ({})", column, op, placeholders.join(", "))
            }
            Self::Contains { column, value } => {
                let idx = params.bind(value.clone());
                dialect.array_contains(&column.to_string(), idx)
            }
            Self::IsNull { column, negated } => {
                if *negated {
                    format!("{} IS NOT NULL", column)
                } else {
                    format!("{} IS NULL", column)
                }
            }
            Self::And(parts) => join_parts(parts, " AND ", "1=1", dialect, params),
            Self::Or(parts) => join_parts(parts, " OR ", "1=0", dialect, params),
            Self::Not(inner) => format!("NOT ({})", inner.to_sql(dialect, params)),
            Self::Exists {
                tables,
                correlation,
                predicate,
            } => {
                let from: Vec<String> = tables.iter().map(AliasedTable::to_sql).collect();
                let mut conditions: Vec<String> = correlation
                    .iter()
                    .map(|(left, right)| format!("{} = {}", left, right))
                    .collect();
                conditions.push(predicate.to_sql(dialect, params));
                format!(
                    "EXISTS (SELECT 1 FROM {} WHERE {})",
                    from.join(", "),
                    conditions.join(" AND ")
                )
            }
        }
    }

    /// Move every column qualified by `from` to qualifier `to`
    pub fn requalify(self, from: &str, to: &str) -> Self {
        let column = |column: Column| column.requalify(from, to);
        let all = |parts: Vec<Predicate>| -> Vec<Predicate> {
            parts
                .into_iter()
                .map(|part| part.requalify(from, to))
                .collect()
        };
        match self {
            Self::Compare {
                column: c,
                op,
                value,
            } => Self::Compare {
                column: column(c),
                op,
                value,
            },
            Self::Match {
                column: c,
                value,
                anchor,
                case_insensitive,
            } => Self::Match {
                column: column(c),
                value,
                anchor,
                case_insensitive,
            },
            Self::InList {
                column: c,
                values,
                negated,
            } => Self::InList {
                column: column(c),
                values,
                negated,
            },
            Self::Contains { column: c, value } => Self::Contains {
                column: column(c),
                value,
            },
            Self::IsNull { column: c, negated } => Self::IsNull {
                column: column(c),
                negated,
            },
            Self::And(parts) => Self::And(all(parts)),
            Self::Or(parts) => Self::Or(all(parts)),
            Self::Not(inner) => Self::Not(Box::new(inner.requalify(from, to))),
            Self::Exists {
                tables,
                correlation,
                predicate,
            } => Self::Exists {
                tables,
                correlation: correlation
                    .into_iter()
                    .map(|(left, right)| (column(left), column(right)))
                    .collect(),
                predicate: Box::new(predicate.requalify(from, to)),
            },
        }
    }
}

fn join_parts(
    parts: &[Predicate],
    separator: &str,
    empty: &str,
    dialect: &dyn SqlDialect,
    params: &mut SqlParams,
) -> String {
    match parts {
        [] => empty.to_string(),
        [single] => single.to_sql(dialect, params),
        _ => {
            let rendered: Vec<String> = parts.iter().map(|p| p.to_sql(dialect, params)).collect();
            format!("({})", rendered.join(separator))
        }
    }
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        Predicate::Not(Box::new(self))
    }
}

//! Filter configuration types
//!
//! A [`FilterConfig`] maps request argument keys to the columns and lookups
//! they filter on. Configurations are built once and reused read-only across
//! requests.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::error::FilterError;
use crate::data::query::{Column, Predicate};

/// Operator applied between a column and a supplied value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Lookup {
    #[default]
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Case-sensitive substring
    Like,
    /// Case-insensitive substring
    Ilike,
    Starts,
    Ends,
    Istarts,
    Iends,
    In,
    NotIn,
    /// Array column contains the element
    Contains,
    IsNull,
    IsNotNull,
}

impl Lookup {
    pub const ALL: [Lookup; 17] = [
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Le,
        Self::Gt,
        Self::Ge,
        Self::Like,
        Self::Ilike,
        Self::Starts,
        Self::Ends,
        Self::Istarts,
        Self::Iends,
        Self::In,
        Self::NotIn,
        Self::Contains,
        Self::IsNull,
        Self::IsNotNull,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Like => "like",
            Self::Ilike => "ilike",
            Self::Starts => "starts",
            Self::Ends => "ends",
            Self::Istarts => "istarts",
            Self::Iends => "iends",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Contains => "contains",
            Self::IsNull => "is_null",
            Self::IsNotNull => "is_not_null",
        }
    }
}

impl FromStr for Lookup {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lookup| lookup.as_str() == s)
            .ok_or_else(|| FilterError::UnsupportedLookup(s.to_string()))
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transform applied to a field's predicate before it joins the filter set
///
/// Typically lifts a predicate on a related table into one on the queried
/// entity, see [`Relation::any`](super::Relation::any).
#[derive(Clone)]
pub struct Wrapper(Arc<dyn Fn(Predicate) -> Predicate + Send + Sync>);

impl Wrapper {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Predicate) -> Predicate + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wrapper negating the predicate
    pub fn negate() -> Self {
        Self::new(|predicate| !predicate)
    }

    pub fn apply(&self, predicate: Predicate) -> Predicate {
        (self.0)(predicate)
    }
}

impl fmt::Debug for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Wrapper(..)")
    }
}

/// How one argument key filters one column
#[derive(Debug, Clone)]
pub struct FieldConfig {
    pub column: Column,
    pub lookup: Lookup,
    pub wrapper: Option<Wrapper>,
}

impl FieldConfig {
    /// Equality filter on `column`
    pub fn new(column: Column) -> Self {
        Self {
            column,
            lookup: Lookup::default(),
            wrapper: None,
        }
    }

    pub fn lookup(mut self, lookup: Lookup) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn wrapper(mut self, wrapper: Wrapper) -> Self {
        self.wrapper = Some(wrapper);
        self
    }
}

/// Configuration for one argument key
#[derive(Debug, Clone)]
pub enum FilterEntry {
    Single(FieldConfig),
    /// Alternative interpretations of the same value, OR-combined
    Alternatives(Vec<FieldConfig>),
}

impl From<FieldConfig> for FilterEntry {
    fn from(field: FieldConfig) -> Self {
        Self::Single(field)
    }
}

impl From<Vec<FieldConfig>> for FilterEntry {
    fn from(fields: Vec<FieldConfig>) -> Self {
        Self::Alternatives(fields)
    }
}

/// Ordered mapping from argument key to filter entry
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    entries: Vec<(String, FilterEntry)>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for `key`, keeping its position on replace
    pub fn field(mut self, key: impl Into<String>, entry: impl Into<FilterEntry>) -> Self {
        let key = key.into();
        let entry = entry.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((key, entry)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&FilterEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| entry)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterEntry)> {
        self.entries.iter().map(|(k, entry)| (k.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

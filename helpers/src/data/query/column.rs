//! Table and column references

use std::fmt;

/// Reference to a queryable column, optionally qualified by its table
///
/// Names are written into SQL as-is. They come from code-defined filter
/// configuration, never from request input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    pub table: Option<String>,
    pub name: String,
}

impl Column {
    /// Column qualified by table (`table.name`)
    pub fn new(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// Unqualified column
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    /// Move the column from qualifier `from` to `to`; other columns are unchanged
    pub fn requalify(self, from: &str, to: &str) -> Self {
        match self.table.as_deref() {
            Some(table) if table == from => Self::new(to, self.name),
            _ => self,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}.{}", table, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The model a query selects from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub table: String,
    pub primary_key: String,
    pub soft_delete: String,
}

impl Entity {
    /// Entity with `id` primary key and `deleted` soft-delete marker
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            primary_key: "id".to_string(),
            soft_delete: "deleted".to_string(),
        }
    }

    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = column.into();
        self
    }

    pub fn soft_delete(mut self, column: impl Into<String>) -> Self {
        self.soft_delete = column.into();
        self
    }

    /// Qualified reference to one of this entity's columns
    pub fn column(&self, name: impl Into<String>) -> Column {
        Column::new(self.table.clone(), name)
    }

    pub fn id_column(&self) -> Column {
        self.column(self.primary_key.clone())
    }

    pub fn deleted_column(&self) -> Column {
        self.column(self.soft_delete.clone())
    }
}

/// Table referenced under an alias inside a subquery
///
/// The alias keeps the subquery's rows apart from the outer query's rows when
/// both read the same table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasedTable {
    pub table: String,
    pub alias: String,
}

impl AliasedTable {
    pub fn new(table: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: alias.into(),
        }
    }

    /// Column of this table, qualified by the alias
    pub fn column(&self, name: impl Into<String>) -> Column {
        Column::new(self.alias.clone(), name)
    }

    pub fn to_sql(&self) -> String {
        format!("{} AS {}", self.table, self.alias)
    }
}

/// Inner join of another table onto the query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub table: String,
    pub left: Column,
    pub right: Column,
}

impl Join {
    pub fn inner(table: impl Into<String>, left: Column, right: Column) -> Self {
        Self {
            table: table.into(),
            left,
            right,
        }
    }

    pub fn to_sql(&self) -> String {
        format!(
            "INNER JOIN {} ON {} = {}",
            self.table, self.left, self.right
        )
    }
}

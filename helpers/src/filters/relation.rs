//! Relationship wrappers
//!
//! Filters on a related table's columns become correlated `EXISTS` predicates
//! on the queried entity, e.g. "patients having a tag with id in (..)".
//!
//! Related tables are read under an alias (`<table>_r1`, `<table>_r2`) so a
//! relation from a table onto itself compares distinct rows.

use super::types::Wrapper;
use crate::data::query::{AliasedTable, Column, Predicate};

/// How rows of a related table correlate with the queried entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Subquery tables; the target is last
    tables: Vec<AliasedTable>,
    correlation: Vec<(Column, Column)>,
}

impl Relation {
    /// Related rows in `target` reference the parent through `foreign_key`
    pub fn one_to_many(target: impl Into<String>, foreign_key: Column, parent_key: Column) -> Self {
        let target = aliased(target.into(), 1);
        Self {
            correlation: vec![(on(&target, foreign_key), parent_key)],
            tables: vec![target],
        }
    }

    /// The parent references one `target` row through `foreign_key`
    pub fn many_to_one(target: impl Into<String>, target_key: Column, foreign_key: Column) -> Self {
        let target = aliased(target.into(), 1);
        Self {
            correlation: vec![(on(&target, target_key), foreign_key)],
            tables: vec![target],
        }
    }

    /// Parent and `target` rows are linked through the `secondary` table
    pub fn many_to_many(
        secondary: impl Into<String>,
        target: impl Into<String>,
        parent_key: Column,
        secondary_parent: Column,
        secondary_target: Column,
        target_key: Column,
    ) -> Self {
        let secondary = aliased(secondary.into(), 1);
        let target = aliased(target.into(), 2);
        Self {
            correlation: vec![
                (on(&secondary, secondary_parent), parent_key),
                (on(&secondary, secondary_target), on(&target, target_key)),
            ],
            tables: vec![secondary, target],
        }
    }

    /// Read the target table under `alias` instead of the generated one
    ///
    /// Needed when relations onto the same table are nested.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if let Some(target) = self.tables.last_mut() {
            let previous = std::mem::replace(&mut target.alias, alias.clone());
            self.correlation = self
                .correlation
                .into_iter()
                .map(|(left, right)| {
                    (
                        left.requalify(&previous, &alias),
                        right.requalify(&previous, &alias),
                    )
                })
                .collect();
        }
        self
    }

    /// Column `name` of the related target row
    pub fn column(&self, name: impl Into<String>) -> Column {
        match self.tables.last() {
            Some(target) => target.column(name),
            None => Column::bare(name),
        }
    }

    /// Parent rows with at least one related row matching `predicate`
    ///
    /// Columns of `predicate` qualified by a related table's name are read
    /// from that table's aliased rows.
    pub fn exists(&self, predicate: Predicate) -> Predicate {
        let predicate = self.tables.iter().fold(predicate, |predicate, table| {
            predicate.requalify(&table.table, &table.alias)
        });
        Predicate::Exists {
            tables: self.tables.clone(),
            correlation: self.correlation.clone(),
            predicate: Box::new(predicate),
        }
    }

    /// Wrapper form of [`Relation::exists`] for field configuration
    pub fn any(&self) -> Wrapper {
        let relation = self.clone();
        Wrapper::new(move |predicate| relation.exists(predicate))
    }
}

fn aliased(table: String, position: usize) -> AliasedTable {
    let alias = format!("{}_r{}", table, position);
    AliasedTable::new(table, alias)
}

/// `column` of `table`, read through the table's alias
fn on(table: &AliasedTable, column: Column) -> Column {
    column.requalify(&table.table, &table.alias)
}

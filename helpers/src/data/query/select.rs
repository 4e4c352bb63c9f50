//! Select queries over a single entity

use super::column::{Column, Entity, Join};
use super::params::SqlParams;
use super::predicate::Predicate;
use crate::data::sql::SqlDialect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

/// ORDER BY term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: Column,
    pub direction: OrderDirection,
}

impl OrderBy {
    pub fn asc(column: Column) -> Self {
        Self {
            column,
            direction: OrderDirection::Asc,
        }
    }

    pub fn desc(column: Column) -> Self {
        Self {
            column,
            direction: OrderDirection::Desc,
        }
    }

    pub fn to_sql(&self) -> String {
        let dir = match self.direction {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        };
        format!("{} {}", self.column, dir)
    }
}

/// A select over one entity's rows
///
/// Predicates are AND-combined. When the query is distinct and has joins,
/// rows are deduplicated by primary key through an `IN` subquery, so join
/// fan-out never repeats or over-counts a row. Ordering applies to the outer
/// select and should reference the entity's own columns.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    entity: Entity,
    joins: Vec<Join>,
    predicates: Vec<Predicate>,
    distinct: bool,
    order_by: Vec<OrderBy>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl SelectQuery {
    /// Unfiltered query over all rows of `entity`
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            joins: Vec::new(),
            predicates: Vec::new(),
            distinct: false,
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn filter_all(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Self {
        self.predicates.extend(predicates);
        self
    }

    /// Deduplicate result rows by primary key
    pub fn distinct_by_id(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by.push(order);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Render the row query
    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> (String, SqlParams) {
        let mut params = SqlParams::default();
        let mut sql = format!(
            "SELECT {table}.* FROM {table}{filter}",
            table = self.entity.table,
            filter = self.filter_sql(dialect, &mut params)
        );

        if !self.order_by.is_empty() {
            let terms: Vec<String> = self.order_by.iter().map(OrderBy::to_sql).collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&terms.join(", "));
        }

        let window = dialect.limit_offset(self.limit, self.offset);
        if !window.is_empty() {
            sql.push(' ');
            sql.push_str(&window);
        }

        (sql, params)
    }

    /// Render a count over the unwindowed query
    ///
    /// Ordering, limit and offset are ignored.
    pub fn count_sql(&self, dialect: &dyn SqlDialect) -> (String, SqlParams) {
        let mut params = SqlParams::default();
        let sql = format!(
            "SELECT COUNT(*) FROM {}{}",
            self.entity.table,
            self.filter_sql(dialect, &mut params)
        );
        (sql, params)
    }

    /// Joins and WHERE clause following `FROM <table>`, with a leading space
    fn filter_sql(&self, dialect: &dyn SqlDialect, params: &mut SqlParams) -> String {
        if self.distinct && !self.joins.is_empty() {
            let id = self.entity.id_column();
            return format!(
                " WHERE {id} IN (SELECT {id} FROM {table}{joins}{where_clause})",
                id = id,
                table = self.entity.table,
                joins = self.joins_sql(),
                where_clause = self.where_sql(dialect, params)
            );
        }
        format!("{}{}", self.joins_sql(), self.where_sql(dialect, params))
    }

    fn joins_sql(&self) -> String {
        self.joins
            .iter()
            .map(|j| format!(" {}", j.to_sql()))
            .collect::<String>()
    }

    fn where_sql(&self, dialect: &dyn SqlDialect, params: &mut SqlParams) -> String {
        if self.predicates.is_empty() {
            return String::new();
        }
        let clauses: Vec<String> = self
            .predicates
            .iter()
            .map(|p| p.to_sql(dialect, params))
            .collect();
        format!(" WHERE {}", clauses.join(" AND "))
    }
}

//! Query builder utilities
//!
//! This module provides SQL query construction utilities.

use crate::marker::{MarkerStrategy, Visibility};
use crate::query_builder::filter::QueryFilter;
use crate::query_builder::ordering::SortOrder;
use crate::query_builder::sql_generation::SqlGenerator;
use serde_json::Value;

/// Query builder for constructing complex database queries
///
/// Carries a visibility alongside the conditions; deleted rows stay
/// excluded unless a caller asks for them explicitly.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    pub(crate) conditions: Vec<QueryFilter>,
    pub(crate) order_by: Vec<(String, SortOrder)>,
    pub(crate) limit: Option<i64>,
    pub(crate) offset: Option<i64>,
    pub(crate) visibility: Visibility,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            visibility: Visibility::NotDeleted,
        }
    }

    /// Add a filter condition
    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.conditions.push(filter);
        self
    }

    /// Add multiple filters (combined with AND)
    pub fn filters(mut self, filters: Vec<QueryFilter>) -> Self {
        self.conditions.extend(filters);
        self
    }

    /// Add ordering
    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.order_by.push((field.to_string(), order));
        self
    }

    /// Add limit
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Add offset
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Only deleted rows
    pub fn deleted_only(mut self) -> Self {
        self.visibility = Visibility::Deleted;
        self
    }

    /// All rows, deleted or not
    pub fn ignoring_soft_deletion(mut self) -> Self {
        self.visibility = Visibility::Unscoped;
        self
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Build WHERE clause from the conditions alone, no scope applied
    pub fn build_where_clause(&self) -> (String, Vec<Value>) {
        SqlGenerator::build_where_clause(&self.conditions)
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(&self) -> String {
        SqlGenerator::build_order_clause(&self.order_by)
    }

    /// Build LIMIT/OFFSET clause
    pub fn build_limit_clause(&self) -> String {
        SqlGenerator::build_limit_clause(self.limit, self.offset)
    }

    /// Build complete query parts (WHERE, ORDER BY, LIMIT, Values) with the
    /// marker predicate for this query's visibility composed in
    pub fn build_scoped(&self, marker: &MarkerStrategy) -> (String, String, String, Vec<Value>) {
        let scope = marker.scope_sql(self.visibility);
        let (where_clause, values) =
            SqlGenerator::build_scoped_where_clause(scope.as_deref(), &self.conditions);
        let order_clause = self.build_order_clause();
        let limit_clause = self.build_limit_clause();

        (where_clause, order_clause, limit_clause, values)
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Predicate builder
//!
//! Collects validated filters for a single request. Invalid values are dropped
//! silently so one malformed parameter only removes its own predicate.

use super::types::{Filter, FilterOp, FilterValue, ProductField};

/// Ordered set of validated filters (AND-composed when compiled)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filtration {
    filters: Vec<Filter>,
}

impl Filtration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict comparison (`=`)
    pub fn equal(self, field: ProductField, value: Option<&str>, max_len: Option<usize>) -> Self {
        self.push(field, value, max_len, FilterOp::Equal)
    }

    /// Substring match (`LIKE %value%`)
    pub fn contains(self, field: ProductField, value: Option<&str>, max_len: Option<usize>) -> Self {
        self.push(field, value, max_len, FilterOp::Contains)
    }

    /// Lower bound (`>=`)
    pub fn greater_or_equal(
        self,
        field: ProductField,
        value: Option<&str>,
        max_len: Option<usize>,
    ) -> Self {
        self.push(field, value, max_len, FilterOp::GreaterOrEqual)
    }

    /// Upper bound (`<=`)
    pub fn less_or_equal(
        self,
        field: ProductField,
        value: Option<&str>,
        max_len: Option<usize>,
    ) -> Self {
        self.push(field, value, max_len, FilterOp::LessOrEqual)
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    fn push(
        mut self,
        field: ProductField,
        value: Option<&str>,
        max_len: Option<usize>,
        op: FilterOp,
    ) -> Self {
        match FilterValue::validate(value, max_len) {
            Some(value) => self.filters.push(Filter { field, value, op }),
            None => tracing::trace!(%field, ?op, "Dropping invalid filter value"),
        }
        self
    }
}

//! Filter type definitions
//!
//! Defines the filterable product fields, the comparison operators and the
//! validated value type used by the predicate builder.

use std::fmt;

/// Product columns that may appear in a search predicate
///
/// Column names are interpolated into SQL text, so this set is closed and
/// chosen by route handlers, never parsed from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Id,
    Name,
    Ean,
    Price,
}

impl ProductField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Ean => "ean",
            Self::Price => "price",
        }
    }

    /// Whether the column holds numbers, so text values compare after coercion
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Id | Self::Price)
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Comparison applied between a column and its bound value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equal,
    Contains,
    GreaterOrEqual,
    LessOrEqual,
}

impl FilterOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Contains => "LIKE",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
        }
    }

    /// Value as bound to the placeholder (substring matches get `%` on both sides)
    pub fn bind_value(&self, value: &FilterValue) -> String {
        match self {
            Self::Contains => format!("%{}%", value.as_str()),
            Self::Equal | Self::GreaterOrEqual | Self::LessOrEqual => value.as_str().to_string(),
        }
    }
}

/// A filter value that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterValue(String);

impl FilterValue {
    /// Validate a raw request value.
    ///
    /// Accepts present, non-empty values whose length in characters does not
    /// exceed `max_len` (unbounded when `None`). Anything else is rejected by
    /// returning `None`; rejection is not an error.
    pub fn validate(raw: Option<&str>, max_len: Option<usize>) -> Option<Self> {
        let value = raw?;
        if value.is_empty() {
            return None;
        }
        if let Some(max) = max_len
            && value.chars().count() > max
        {
            return None;
        }
        Some(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One validated predicate: `field op value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: ProductField,
    pub value: FilterValue,
    pub op: FilterOp,
}

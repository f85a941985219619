//! Criteria compiler
//!
//! Turns a [`Filtration`] into a WHERE fragment with `?` placeholders and the
//! values to bind, in placeholder order.

use super::builder::Filtration;
use super::types::Filter;

/// Compiled predicate text plus its bound values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledCriteria {
    pub predicate: String,
    pub values: Vec<String>,
}

impl CompiledCriteria {
    /// `WHERE ...` clause, or an empty string when nothing restricts the query
    pub fn where_clause(&self) -> String {
        if self.predicate.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.predicate)
        }
    }
}

/// Compile filters into a conjunctive predicate.
///
/// Each filter becomes ` column op ? `; fragments are joined with ` AND `.
/// An empty filtration compiles to an empty predicate (no restriction).
pub fn compile(filtration: &Filtration) -> CompiledCriteria {
    compile_with(filtration, |_| "?")
}

/// Compile with a backend-specific placeholder per filter
///
/// `placeholder` returns the SQL that stands for the bound value, e.g.
/// `CAST(? AS NUMERIC)`; it must contain exactly one `?`.
pub fn compile_with<F>(filtration: &Filtration, placeholder: F) -> CompiledCriteria
where
    F: Fn(&Filter) -> &'static str,
{
    let mut fragments = Vec::with_capacity(filtration.len());
    let mut values = Vec::with_capacity(filtration.len());

    for filter in filtration.filters() {
        fragments.push(format!(
            " {} {} {} ",
            filter.field.column(),
            filter.op.symbol(),
            placeholder(filter)
        ));
        values.push(filter.op.bind_value(&filter.value));
    }

    CompiledCriteria {
        predicate: fragments.join(" AND "),
        values,
    }
}

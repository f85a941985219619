//! Shared data types across backends

use serde::{Deserialize, Serialize};

/// A catalog product as stored
///
/// `created_at` is unix seconds regardless of the backend column type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub ean: String,
    pub price: f64,
    pub created_at: i64,
}

impl From<(i64, String, String, f64, i64)> for ProductRow {
    fn from((id, name, ean, price, created_at): (i64, String, String, f64, i64)) -> Self {
        Self {
            id,
            name,
            ean,
            price,
            created_at,
        }
    }
}

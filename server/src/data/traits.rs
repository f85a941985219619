//! Repository traits for database backends
//!
//! `ProductRepository` is the read-only gateway to the catalog. SQLite and
//! MySQL implement it; callers never see which one is active.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::filters::Filtration;
use crate::data::types::ProductRow;

/// Read-only catalog operations
///
/// Every listing is ordered by `created_at ASC, id ASC`. Store failures are
/// returned unchanged; nothing is retried.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products
    async fn get_all_products(&self) -> Result<Vec<ProductRow>, DataError>;

    /// One page of products
    async fn get_products_with_limit_and_offset(
        &self,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<ProductRow>, DataError>;

    /// Total number of products
    async fn get_products_qty(&self) -> Result<u64, DataError>;

    /// Product by ID, `None` when it does not exist
    async fn get_single_product(&self, id: i64) -> Result<Option<ProductRow>, DataError>;

    /// Products matching every filter in `filtration`
    async fn get_products_with_filtration(
        &self,
        filtration: &Filtration,
    ) -> Result<Vec<ProductRow>, DataError>;
}

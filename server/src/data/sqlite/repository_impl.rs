//! ProductRepository trait implementation for SQLite

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::filters::Filtration;
use crate::data::traits::ProductRepository;
use crate::data::types::ProductRow;

use super::SqliteService;
use super::repositories::product;

#[async_trait]
impl ProductRepository for Arc<SqliteService> {
    async fn get_all_products(&self) -> Result<Vec<ProductRow>, DataError> {
        product::get_all_products(self.pool())
            .await
            .map_err(Into::into)
    }

    async fn get_products_with_limit_and_offset(
        &self,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<ProductRow>, DataError> {
        product::get_products_with_limit_and_offset(self.pool(), limit, offset)
            .await
            .map_err(Into::into)
    }

    async fn get_products_qty(&self) -> Result<u64, DataError> {
        product::get_products_qty(self.pool())
            .await
            .map_err(Into::into)
    }

    async fn get_single_product(&self, id: i64) -> Result<Option<ProductRow>, DataError> {
        product::get_single_product(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn get_products_with_filtration(
        &self,
        filtration: &Filtration,
    ) -> Result<Vec<ProductRow>, DataError> {
        product::get_products_with_filtration(self.pool(), filtration)
            .await
            .map_err(Into::into)
    }
}

//! Product repository for MySQL operations
//!
//! The catalog table is owned externally, so column types vary between
//! installations (DECIMAL prices, DATETIME timestamps). The projection casts
//! them into the shapes `ProductRow` expects using only forms that MySQL 5.7
//! and MariaDB accept (`price + 0e0` instead of `CAST(price AS DOUBLE)`).

use sqlx::MySqlPool;

use crate::data::filters::{Filtration, compile};
use crate::data::mysql::MysqlError;
use crate::data::types::ProductRow;

type ProductTuple = (i64, String, String, f64, i64);

const SELECT_PRODUCTS: &str = "SELECT CAST(id AS SIGNED), name, ean, price + 0e0, \
     CAST(UNIX_TIMESTAMP(created_at) AS SIGNED) FROM products";
const ORDER_BY: &str = "ORDER BY created_at ASC, id ASC";

/// All products ordered by creation time
pub async fn get_all_products(pool: &MySqlPool) -> Result<Vec<ProductRow>, MysqlError> {
    let sql = format!("{} {}", SELECT_PRODUCTS, ORDER_BY);
    let rows = sqlx::query_as::<_, ProductTuple>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(ProductRow::from).collect())
}

/// A window of products ordered by creation time
pub async fn get_products_with_limit_and_offset(
    pool: &MySqlPool,
    limit: u32,
    offset: u64,
) -> Result<Vec<ProductRow>, MysqlError> {
    let sql = format!("{} {} LIMIT ? OFFSET ?", SELECT_PRODUCTS, ORDER_BY);
    let rows = sqlx::query_as::<_, ProductTuple>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(ProductRow::from).collect())
}

/// Number of rows in the catalog
pub async fn get_products_qty(pool: &MySqlPool) -> Result<u64, MysqlError> {
    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    Ok(total.0.max(0) as u64)
}

/// Product by ID
pub async fn get_single_product(
    pool: &MySqlPool,
    id: i64,
) -> Result<Option<ProductRow>, MysqlError> {
    let sql = format!("{} WHERE id = ?", SELECT_PRODUCTS);
    let row = sqlx::query_as::<_, ProductTuple>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(ProductRow::from))
}

/// Products matching the compiled filtration
///
/// Values are bound as strings; MySQL converts them when comparing against
/// numeric columns.
pub async fn get_products_with_filtration(
    pool: &MySqlPool,
    filtration: &Filtration,
) -> Result<Vec<ProductRow>, MysqlError> {
    let criteria = compile(filtration);
    let sql = format!(
        "{}{} {}",
        SELECT_PRODUCTS,
        criteria.where_clause(),
        ORDER_BY
    );
    tracing::trace!(%sql, params = criteria.values.len(), "Filtered product query");

    let mut query = sqlx::query_as::<_, ProductTuple>(&sql);
    for value in &criteria.values {
        query = query.bind(value);
    }
    let rows = query.fetch_all(pool).await?;

    Ok(rows.into_iter().map(ProductRow::from).collect())
}

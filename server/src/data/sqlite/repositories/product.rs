//! Product repository for SQLite operations
//!
//! Filter values are bound as text. Comparisons against numeric columns wrap
//! the placeholder in `CAST(? AS NUMERIC)`, which reads the longest numeric
//! prefix and falls back to 0: `'10abc'` compares as 10 and `'abc'` as 0.

use sqlx::SqlitePool;

use crate::data::filters::{Filter, Filtration, compile_with};
use crate::data::sqlite::SqliteError;
use crate::data::types::ProductRow;

type ProductTuple = (i64, String, String, f64, i64);

fn placeholder(filter: &Filter) -> &'static str {
    if filter.field.is_numeric() {
        "CAST(? AS NUMERIC)"
    } else {
        "?"
    }
}

const SELECT_PRODUCTS: &str = "SELECT id, name, ean, price, created_at FROM products";
const ORDER_BY: &str = "ORDER BY created_at ASC, id ASC";

/// All products ordered by creation time
pub async fn get_all_products(pool: &SqlitePool) -> Result<Vec<ProductRow>, SqliteError> {
    let sql = format!("{} {}", SELECT_PRODUCTS, ORDER_BY);
    let rows = sqlx::query_as::<_, ProductTuple>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(ProductRow::from).collect())
}

/// A window of products ordered by creation time
pub async fn get_products_with_limit_and_offset(
    pool: &SqlitePool,
    limit: u32,
    offset: u64,
) -> Result<Vec<ProductRow>, SqliteError> {
    let sql = format!("{} {} LIMIT ? OFFSET ?", SELECT_PRODUCTS, ORDER_BY);
    let rows = sqlx::query_as::<_, ProductTuple>(&sql)
        .bind(limit)
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(ProductRow::from).collect())
}

/// Number of rows in the catalog
pub async fn get_products_qty(pool: &SqlitePool) -> Result<u64, SqliteError> {
    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    Ok(total.0.max(0) as u64)
}

/// Product by ID
pub async fn get_single_product(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<ProductRow>, SqliteError> {
    let sql = format!("{} WHERE id = ?", SELECT_PRODUCTS);
    let row = sqlx::query_as::<_, ProductTuple>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(ProductRow::from))
}

/// Products matching the compiled filtration
pub async fn get_products_with_filtration(
    pool: &SqlitePool,
    filtration: &Filtration,
) -> Result<Vec<ProductRow>, SqliteError> {
    let criteria = compile_with(filtration, placeholder);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::ProductField;

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    async fn insert_product(pool: &SqlitePool, name: &str, ean: &str, price: f64, created_at: i64) {
        sqlx::query("INSERT INTO products (name, ean, price, created_at) VALUES (?, ?, ?, ?)")
            .bind(name)
            .bind(ean)
            .bind(price)
            .bind(created_at)
            .execute(pool)
            .await
            .unwrap();
    }

    /// Five products; insertion order differs from creation order on purpose.
    async fn seeded_pool() -> SqlitePool {
        let pool = setup_test_pool().await;
        insert_product(&pool, "Green Tea", "4600000000011", 3.50, 1_700_000_300).await;
        insert_product(&pool, "Black Tea", "4600000000028", 4.25, 1_700_000_100).await;
        insert_product(&pool, "Coffee Beans", "4600000000035", 12.00, 1_700_000_500).await;
        insert_product(&pool, "Tea Pot", "5900000000042", 25.00, 1_700_000_200).await;
        insert_product(&pool, "Cocoa", "5900000000059", 7.80, 1_700_000_400).await;
        pool
    }

    fn names(rows: &[ProductRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_get_all_products_ordered_by_created_at() {
        let pool = seeded_pool().await;
        let rows = get_all_products(&pool).await.unwrap();

        assert_eq!(
            names(&rows),
            vec!["Black Tea", "Tea Pot", "Green Tea", "Cocoa", "Coffee Beans"]
        );
    }

    #[tokio::test]
    async fn test_get_all_products_empty() {
        let pool = setup_test_pool().await;
        assert!(get_all_products(&pool).await.unwrap().is_empty());
        assert_eq!(get_products_qty(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_products_qty() {
        let pool = seeded_pool().await;
        assert_eq!(get_products_qty(&pool).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_pages_partition_catalog() {
        let pool = seeded_pool().await;
        let qty = get_products_qty(&pool).await.unwrap();
        let per_page = 2u32;
        let pages = qty.div_ceil(per_page as u64);
        assert_eq!(pages, 3);

        let mut collected = Vec::new();
        for page in 0..pages {
            let rows = get_products_with_limit_and_offset(&pool, per_page, page * per_page as u64)
                .await
                .unwrap();
            assert!(!rows.is_empty());
            assert!(rows.len() <= per_page as usize);
            collected.extend(rows);
        }

        let all = get_all_products(&pool).await.unwrap();
        assert_eq!(collected, all);

        let beyond = get_products_with_limit_and_offset(&pool, per_page, pages * per_page as u64)
            .await
            .unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_equal_created_at_is_stable() {
        let pool = setup_test_pool().await;
        for i in 0..4 {
            insert_product(&pool, &format!("Item {}", i), "1", 1.0, 1_700_000_000).await;
        }

        let first = get_products_with_limit_and_offset(&pool, 2, 0).await.unwrap();
        let second = get_products_with_limit_and_offset(&pool, 2, 2).await.unwrap();
        assert_eq!(names(&first), vec!["Item 0", "Item 1"]);
        assert_eq!(names(&second), vec!["Item 2", "Item 3"]);
    }

    #[tokio::test]
    async fn test_get_single_product() {
        let pool = seeded_pool().await;
        let product = get_single_product(&pool, 3).await.unwrap().unwrap();

        assert_eq!(product.id, 3);
        assert_eq!(product.name, "Coffee Beans");
        assert_eq!(product.ean, "4600000000035");
        assert_eq!(product.price, 12.00);
        assert_eq!(product.created_at, 1_700_000_500);
    }

    #[tokio::test]
    async fn test_get_single_product_not_found() {
        let pool = seeded_pool().await;
        assert!(get_single_product(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_filtration_empty_returns_everything() {
        let pool = seeded_pool().await;
        let rows = get_products_with_filtration(&pool, &Filtration::new())
            .await
            .unwrap();
        assert_eq!(rows, get_all_products(&pool).await.unwrap());
    }

    #[tokio::test]
    async fn test_filtration_contains_name() {
        let pool = seeded_pool().await;
        let filtration = Filtration::new().contains(ProductField::Name, Some("Tea"), Some(255));
        let rows = get_products_with_filtration(&pool, &filtration)
            .await
            .unwrap();

        assert_eq!(names(&rows), vec!["Black Tea", "Tea Pot", "Green Tea"]);
    }

    #[tokio::test]
    async fn test_filtration_equal_id_from_text() {
        let pool = seeded_pool().await;
        let filtration = Filtration::new().equal(ProductField::Id, Some("2"), Some(255));
        let rows = get_products_with_filtration(&pool, &filtration)
            .await
            .unwrap();

        assert_eq!(names(&rows), vec!["Black Tea"]);
    }

    #[tokio::test]
    async fn test_filtration_price_range() {
        let pool = seeded_pool().await;
        let filtration = Filtration::new()
            .greater_or_equal(ProductField::Price, Some("4"), Some(255))
            .less_or_equal(ProductField::Price, Some("12"), Some(255));
        let rows = get_products_with_filtration(&pool, &filtration)
            .await
            .unwrap();

        assert_eq!(names(&rows), vec!["Black Tea", "Cocoa", "Coffee Beans"]);
    }

    #[tokio::test]
    async fn test_filtration_non_numeric_bound_reads_as_zero() {
        let pool = seeded_pool().await;

        let upper = Filtration::new().less_or_equal(ProductField::Price, Some("abc"), Some(255));
        let rows = get_products_with_filtration(&pool, &upper).await.unwrap();
        assert!(rows.is_empty());

        let lower = Filtration::new().greater_or_equal(ProductField::Price, Some("abc"), Some(255));
        let rows = get_products_with_filtration(&pool, &lower).await.unwrap();
        assert_eq!(rows.len(), 5);
    }

    #[tokio::test]
    async fn test_filtration_numeric_prefix_is_used() {
        let pool = seeded_pool().await;

        let filtration =
            Filtration::new().greater_or_equal(ProductField::Price, Some("10abc"), Some(255));
        let rows = get_products_with_filtration(&pool, &filtration)
            .await
            .unwrap();
        assert_eq!(names(&rows), vec!["Tea Pot", "Coffee Beans"]);

        let filtration = Filtration::new().equal(ProductField::Id, Some("3abc"), Some(255));
        let rows = get_products_with_filtration(&pool, &filtration)
            .await
            .unwrap();
        assert_eq!(names(&rows), vec!["Coffee Beans"]);
    }

    #[tokio::test]
    async fn test_filtration_decimal_bound() {
        let pool = seeded_pool().await;
        let filtration =
            Filtration::new().less_or_equal(ProductField::Price, Some("4.25"), Some(255));
        let rows = get_products_with_filtration(&pool, &filtration)
            .await
            .unwrap();

        assert_eq!(names(&rows), vec!["Black Tea", "Green Tea"]);
    }

    #[tokio::test]
    async fn test_filtration_ean_prefix_and_name() {
        let pool = seeded_pool().await;
        let filtration = Filtration::new()
            .contains(ProductField::Name, Some("o"), Some(255))
            .contains(ProductField::Ean, Some("590"), Some(255));
        let rows = get_products_with_filtration(&pool, &filtration)
            .await
            .unwrap();

        assert_eq!(names(&rows), vec!["Tea Pot", "Cocoa"]);
    }

    #[tokio::test]
    async fn test_filtration_no_match() {
        let pool = seeded_pool().await;
        let filtration = Filtration::new().contains(ProductField::Name, Some("Juice"), Some(255));
        let rows = get_products_with_filtration(&pool, &filtration)
            .await
            .unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_filtration_injection_attempt_is_bound() {
        let pool = seeded_pool().await;
        let filtration =
            Filtration::new().contains(ProductField::Name, Some("' OR '1'='1"), Some(255));
        let rows = get_products_with_filtration(&pool, &filtration)
            .await
            .unwrap();

        assert!(rows.is_empty());
        assert_eq!(get_products_qty(&pool).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        // No schema: the products table is missing
        let err = get_all_products(&pool).await.unwrap_err();
        assert!(matches!(err, SqliteError::Database(_)));
    }
}

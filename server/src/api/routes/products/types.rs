//! Product page types

use serde::Serialize;

use crate::api::extractors::{Navigation, QueryPairs};
use crate::core::constants::FILTER_MAX_LENGTH;
use crate::data::ProductRow;
use crate::data::filters::{Filtration, ProductField};
use crate::domain::{PAGE_LINKS_WIDTH, PageWindow};

/// Product as shown in the views
#[derive(Debug, Serialize)]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub ean: String,
    pub price: f64,
    /// Unix seconds, formatted by the `datetime` template filter
    pub created_at: i64,
    pub url: String,
}

impl From<ProductRow> for ProductDto {
    fn from(row: ProductRow) -> Self {
        Self {
            url: format!("/product/{}", row.id),
            id: row.id,
            name: row.name,
            ean: row.ean,
            price: row.price,
            created_at: row.created_at,
        }
    }
}

/// Search form fields, echoed back into the form inputs
///
/// A field repeated in the query string is treated as missing.
#[derive(Debug, Default, Serialize)]
pub struct SearchForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub ean: Option<String>,
    pub price_gte: Option<String>,
    pub price_lte: Option<String>,
}

impl SearchForm {
    pub fn from_query(query: &QueryPairs) -> Self {
        let field = |key: &str| query.single(key).map(str::to_string);
        Self {
            id: field("id"),
            name: field("name"),
            ean: field("ean"),
            price_gte: field("price_gte"),
            price_lte: field("price_lte"),
        }
    }

    pub fn filtration(&self) -> Filtration {
        let max_len = Some(FILTER_MAX_LENGTH);
        Filtration::new()
            .equal(ProductField::Id, self.id.as_deref(), max_len)
            .contains(ProductField::Name, self.name.as_deref(), max_len)
            .contains(ProductField::Ean, self.ean.as_deref(), max_len)
            .greater_or_equal(ProductField::Price, self.price_gte.as_deref(), max_len)
            .less_or_equal(ProductField::Price, self.price_lte.as_deref(), max_len)
    }
}

#[derive(Debug, Serialize)]
pub struct PageLink {
    pub number: u64,
    pub current: bool,
}

/// Pagination controls for the paged listing
#[derive(Debug, Serialize)]
pub struct PaginationDto {
    pub page: u64,
    pub pages: u64,
    pub previous: Option<u64>,
    pub next: Option<u64>,
    pub links: Vec<PageLink>,
}

impl From<PageWindow> for PaginationDto {
    fn from(window: PageWindow) -> Self {
        Self {
            page: window.page,
            pages: window.pages,
            previous: window.previous(),
            next: window.next(),
            links: window
                .links(PAGE_LINKS_WIDTH)
                .map(|number| PageLink {
                    number,
                    current: number == window.page,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductListView {
    #[serde(flatten)]
    pub navigation: Navigation,
    pub products: Vec<ProductDto>,
}

#[derive(Debug, Serialize)]
pub struct PagedProductsView {
    #[serde(flatten)]
    pub navigation: Navigation,
    pub products: Vec<ProductDto>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Serialize)]
pub struct SearchView {
    #[serde(flatten)]
    pub navigation: Navigation,
    pub products: Vec<ProductDto>,
    pub search: SearchForm,
    pub filters_applied: usize,
}

#[derive(Debug, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub navigation: Navigation,
    pub product: ProductDto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::{FilterOp, compile};

    fn query(items: &[(&str, &str)]) -> QueryPairs {
        QueryPairs(
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_search_form_maps_fields() {
        let form = SearchForm::from_query(&query(&[
            ("id", "5"),
            ("name", "pro"),
            ("ean", "460"),
            ("price_gte", "1"),
            ("price_lte", "9"),
        ]));
        let filtration = form.filtration();

        let ops: Vec<(ProductField, FilterOp)> = filtration
            .filters()
            .iter()
            .map(|f| (f.field, f.op))
            .collect();
        assert_eq!(
            ops,
            vec![
                (ProductField::Id, FilterOp::Equal),
                (ProductField::Name, FilterOp::Contains),
                (ProductField::Ean, FilterOp::Contains),
                (ProductField::Price, FilterOp::GreaterOrEqual),
                (ProductField::Price, FilterOp::LessOrEqual),
            ]
        );
        assert_eq!(
            compile(&filtration).values,
            vec!["5", "%pro%", "%460%", "1", "9"]
        );
    }

    #[test]
    fn test_search_form_skips_repeated_and_empty() {
        let form = SearchForm::from_query(&query(&[
            ("id", "1"),
            ("id", "2"),
            ("name", ""),
            ("ean", "123"),
        ]));

        assert_eq!(form.id, None);
        assert_eq!(form.name.as_deref(), Some(""));
        assert_eq!(form.filtration().len(), 1);
    }

    #[test]
    fn test_search_form_rejects_long_values() {
        let long = "a".repeat(FILTER_MAX_LENGTH + 1);
        let form = SearchForm::from_query(&query(&[("name", long.as_str())]));
        assert!(form.filtration().is_empty());
    }

    #[test]
    fn test_pagination_dto() {
        let window = PageWindow::locate(2, 5, 2).unwrap();
        let dto = PaginationDto::from(window);

        assert_eq!(dto.previous, Some(1));
        assert_eq!(dto.next, Some(3));
        let numbers: Vec<u64> = dto.links.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(dto.links[1].current);
    }

    #[test]
    fn test_product_dto_url() {
        let dto = ProductDto::from(ProductRow {
            id: 42,
            name: "Tea".to_string(),
            ean: "1".to_string(),
            price: 1.0,
            created_at: 0,
        });
        assert_eq!(dto.url, "/product/42");
    }
}

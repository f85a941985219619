//! Catalog pages

pub mod types;

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use serde::Serialize;

use crate::api::extractors::{Navigation, ProductPath, QueryPairs};
use crate::api::types::ApiError;
use crate::api::views::Views;
use crate::core::constants::PRODUCTS_PER_PAGE;
use crate::data::CatalogStore;
use crate::domain::{PageWindow, parse_page_param};

use types::{
    PagedProductsView, PaginationDto, ProductDto, ProductListView, ProductView, SearchForm,
    SearchView,
};

/// Shared state for the catalog pages
#[derive(Clone)]
pub struct ProductsApiState {
    pub database: Arc<CatalogStore>,
    pub views: Arc<Views>,
}

/// Build catalog page routes
pub fn routes(database: Arc<CatalogStore>, views: Arc<Views>) -> Router<()> {
    let state = ProductsApiState { database, views };

    Router::new()
        .route("/", get(show_all_products))
        .route("/pages", get(split_products_by_pages))
        .route("/pages/", get(split_products_by_pages))
        .route("/search", get(search_products))
        .route("/search/", get(search_products))
        .route("/product/{product_id}", get(show_single_product))
        .route("/product/{product_id}/", get(show_single_product))
        .with_state(state)
}

fn render<S: Serialize>(views: &Views, name: &str, context: S) -> Result<Html<String>, ApiError> {
    Ok(Html(views.render(name, context)?))
}

fn to_dtos(rows: Vec<crate::data::ProductRow>) -> Vec<ProductDto> {
    rows.into_iter().map(ProductDto::from).collect()
}

/// Every product, oldest first
async fn show_all_products(
    State(state): State<ProductsApiState>,
    navigation: Navigation,
) -> Result<Html<String>, ApiError> {
    let rows = state
        .database
        .repository()
        .get_all_products()
        .await?;

    render(
        &state.views,
        "pages/show-all-products.html",
        ProductListView {
            navigation,
            products: to_dtos(rows),
        },
    )
}

/// One page of the catalog, `PRODUCTS_PER_PAGE` at a time
async fn split_products_by_pages(
    State(state): State<ProductsApiState>,
    navigation: Navigation,
    query: QueryPairs,
) -> Result<Html<String>, ApiError> {
    // Repeated `page` keys are read as their comma-joined list, so the first wins
    let page = parse_page_param(query.joined("page").as_deref());
    let repository = state.database.repository();

    let total = repository.get_products_qty().await?;
    let Some(window) = PageWindow::locate(page, total, PRODUCTS_PER_PAGE) else {
        tracing::debug!(page, total, "Page out of range");
        return Err(ApiError::NotFound);
    };

    let rows = repository
        .get_products_with_limit_and_offset(window.limit, window.offset)
        .await?;

    render(
        &state.views,
        "pages/split-products-by-pages.html",
        PagedProductsView {
            navigation,
            products: to_dtos(rows),
            pagination: PaginationDto::from(window),
        },
    )
}

/// Products matching the search form
async fn search_products(
    State(state): State<ProductsApiState>,
    navigation: Navigation,
    query: QueryPairs,
) -> Result<Html<String>, ApiError> {
    let search = SearchForm::from_query(&query);
    let filtration = search.filtration();
    tracing::debug!(filters = filtration.len(), "Searching products");

    let rows = state
        .database
        .repository()
        .get_products_with_filtration(&filtration)
        .await?;

    render(
        &state.views,
        "pages/search-products.html",
        SearchView {
            navigation,
            products: to_dtos(rows),
            search,
            filters_applied: filtration.len(),
        },
    )
}

/// Product detail page
async fn show_single_product(
    State(state): State<ProductsApiState>,
    navigation: Navigation,
    ProductPath { product_id }: ProductPath,
) -> Result<Html<String>, ApiError> {
    let row = state
        .database
        .repository()
        .get_single_product(product_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    render(
        &state.views,
        "pages/show-single-product.html",
        ProductView {
            navigation,
            product: ProductDto::from(row),
        },
    )
}

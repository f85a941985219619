//! Request extractors for the catalog pages

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use serde::Serialize;

use super::types::ApiError;
use crate::core::constants::MAX_SAFE_INTEGER;
use crate::domain::{MENU, MenuItem, active_menu_item};

/// Product id taken from `/product/{product_id}`
///
/// Only plain decimal digits up to 2^53 - 1 name a product; anything else is
/// answered with 404 rather than 400, as for any unknown page.
#[derive(Debug)]
pub struct ProductPath {
    pub product_id: i64,
}

/// Parse a product id path segment
pub fn parse_product_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u64>()
        .ok()
        .filter(|id| *id <= MAX_SAFE_INTEGER)
        .and_then(|id| i64::try_from(id).ok())
}

impl<S> FromRequestParts<S> for ProductPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        let product_id = parse_product_id(&raw).ok_or_else(|| {
            tracing::debug!(product_id = %raw, "Rejected product id");
            ApiError::NotFound
        })?;

        Ok(Self { product_id })
    }
}

/// Query string as ordered key/value pairs
///
/// Keys may repeat; lookups distinguish a single occurrence from several.
#[derive(Debug, Default)]
pub struct QueryPairs(pub Vec<(String, String)>);

impl QueryPairs {
    /// Value of `key` when it occurs exactly once
    pub fn single(&self, key: &str) -> Option<&str> {
        let mut values = self.0.iter().filter(|(k, _)| k == key);
        match (values.next(), values.next()) {
            (Some((_, value)), None) => Some(value.as_str()),
            _ => None,
        }
    }

    /// All values of `key` joined with commas, `None` when absent
    pub fn joined(&self, key: &str) -> Option<String> {
        let values: Vec<&str> = self
            .0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect();
        (!values.is_empty()).then(|| values.join(","))
    }
}

impl<S> FromRequestParts<S> for QueryPairs
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri).map_err(|e| {
            tracing::debug!(error = %e, "Malformed query string");
            ApiError::BadRequest
        })?;
        Ok(Self(pairs))
    }
}

/// Navigation menu with the entry matching the request path
#[derive(Debug, Clone, Serialize)]
pub struct Navigation {
    pub menu: &'static [MenuItem],
    pub active_menu_item: Option<&'static str>,
}

impl Navigation {
    pub fn for_path(path: &str) -> Self {
        Self {
            menu: &MENU,
            active_menu_item: active_menu_item(path),
        }
    }
}

impl<S> FromRequestParts<S> for Navigation
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::for_path(parts.uri.path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> QueryPairs {
        QueryPairs(
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_parse_product_id() {
        assert_eq!(parse_product_id("1"), Some(1));
        assert_eq!(parse_product_id("007"), Some(7));
        assert_eq!(parse_product_id("9007199254740991"), Some(9_007_199_254_740_991));
    }

    #[test]
    fn test_parse_product_id_rejects() {
        assert_eq!(parse_product_id(""), None);
        assert_eq!(parse_product_id("abc"), None);
        assert_eq!(parse_product_id("1a"), None);
        assert_eq!(parse_product_id("-1"), None);
        assert_eq!(parse_product_id("+1"), None);
        assert_eq!(parse_product_id("1.0"), None);
        assert_eq!(parse_product_id("٣"), None);
        assert_eq!(parse_product_id("9007199254740992"), None);
        assert_eq!(parse_product_id("99999999999999999999999"), None);
    }

    #[test]
    fn test_query_single_value() {
        let query = pairs(&[("name", "tea"), ("id", "1"), ("id", "2")]);
        assert_eq!(query.single("name"), Some("tea"));
        assert_eq!(query.single("id"), None);
        assert_eq!(query.single("ean"), None);
    }

    #[test]
    fn test_query_joined_values() {
        let query = pairs(&[("page", "2"), ("page", "3")]);
        assert_eq!(query.joined("page").as_deref(), Some("2,3"));
        assert_eq!(query.joined("missing"), None);
    }

    #[test]
    fn test_navigation_for_path() {
        let nav = Navigation::for_path("/pages");
        assert_eq!(nav.menu.len(), 3);
        assert_eq!(nav.active_menu_item, Some("/pages/"));
        assert_eq!(Navigation::for_path("/product/1").active_menu_item, None);
    }
}

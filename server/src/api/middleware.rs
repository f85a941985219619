//! HTTP middleware (404 handler)

use axum::extract::Request;
use axum::response::IntoResponse;

use super::types::ApiError;

/// Handle 404 Not Found with logging
pub async fn handle_404(req: Request) -> impl IntoResponse {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return ApiError::NotFound;
    }

    let mut headers_map = serde_json::Map::new();
    for (name, value) in req.headers() {
        if let Ok(value_str) = value.to_str() {
            headers_map.insert(
                name.to_string(),
                serde_json::Value::String(value_str.to_string()),
            );
        }
    }

    let log_entry = serde_json::json!({
        "status": 404,
        "method": req.method().to_string(),
        "url": req.uri().to_string(),
        "headers": headers_map,
    });

    if let Ok(pretty) = serde_json::to_string_pretty(&log_entry) {
        tracing::debug!("[404]\n{}", pretty);
    }

    ApiError::NotFound
}

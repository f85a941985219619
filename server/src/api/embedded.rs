//! Assets and view templates embedded in the binary

use axum::{
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// Stylesheets and images served under `/static`
#[derive(RustEmbed)]
#[folder = "static/"]
pub struct Assets;

/// Jinja templates for the HTML views
#[derive(RustEmbed)]
#[folder = "templates/"]
pub struct Templates;

// Static files are not fingerprinted, so clients revalidate against the etag
const CACHE_REVALIDATE: &str = "public, max-age=0, must-revalidate";

pub async fn serve_static(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    let Some(file) = Assets::get(path) else {
        tracing::debug!(path, "Static asset not found");
        return StatusCode::NOT_FOUND.into_response();
    };

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let etag = format!("\"{}\"", hex::encode(file.metadata.sha256_hash()));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CACHE_CONTROL, CACHE_REVALIDATE.to_string()),
            (header::ETAG, etag),
        ],
        file.data.into_owned(),
    )
        .into_response()
}

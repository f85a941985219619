//! HTTP server initialization

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::embedded;
use super::middleware;
use super::routes::{health, products};
use super::views::Views;
use crate::core::CoreApp;
use crate::data::CatalogStore;

/// Assemble every route the server answers
pub fn router(database: Arc<CatalogStore>, views: Arc<Views>) -> Router {
    let static_routes = Router::new().fallback(embedded::serve_static);

    Router::new()
        .merge(products::routes(database, views))
        .route("/api/v1/health", get(health::health))
        .nest("/static", static_routes)
        .fallback(middleware::handle_404)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
}

pub struct ApiServer {
    app: CoreApp,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        Self { app }
    }

    /// Serve until shutdown is triggered; returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let app = self.app;
        let shutdown = app.shutdown.clone();

        let host = app.config.server.host.clone();
        let port = app.config.server.port;

        let router = router(Arc::clone(&app.store), Arc::clone(&app.views));

        let listener = TcpListener::bind((host.as_str(), port))
            .await
            .with_context(|| format!("Failed to bind {}:{}", host, port))?;
        tracing::debug!(addr = ?listener.local_addr().ok(), "Listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        Ok(app)
    }
}

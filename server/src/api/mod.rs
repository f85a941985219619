//! HTTP layer: routes, extractors, views and embedded assets

pub mod embedded;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod types;
pub mod views;

pub use server::{ApiServer, router};

//! Shared API types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::views::ViewError;
use crate::data::DataError;

/// Error returned by page handlers
///
/// Bodies are plain text; details are only logged.
#[derive(Debug)]
pub enum ApiError {
    BadRequest,
    NotFound,
    Internal,
}

impl ApiError {
    pub fn from_data(e: DataError) -> Self {
        tracing::error!(error = %e, backend = e.backend(), "Data error");
        Self::Internal
    }

    pub fn from_view(e: ViewError) -> Self {
        tracing::error!(error = %e, "View rendering failed");
        Self::Internal
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DataError> for ApiError {
    fn from(e: DataError) -> Self {
        Self::from_data(e)
    }
}

impl From<ViewError> for ApiError {
    fn from(e: ViewError) -> Self {
        Self::from_view(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let reason = status.canonical_reason().unwrap_or_default();
        (status, reason).into_response()
    }
}

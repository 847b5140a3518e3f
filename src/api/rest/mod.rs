//! REST API module for HTTP endpoints
//!
//! - `GET /api/menu` - Available menu items
//! - `GET /api/orders` - List orders, optionally by status
//! - `POST /api/orders` - Create an order
//! - `PUT /api/orders/:id/status` - Change an order's status
//! - `DELETE /api/orders/:id` - Delete an order
//! - `GET /api/analytics` - Sales analytics

pub mod analytics;
pub mod menu;
pub mod orders;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::OrderError;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn from_error(err: &OrderError) -> Self {
        Self {
            error: err.to_string(),
            code: err.kind().to_string(),
        }
    }
}

fn status_for(err: &OrderError) -> StatusCode {
    match err {
        OrderError::Validation(_) => StatusCode::BAD_REQUEST,
        OrderError::NotFound(_) => StatusCode::NOT_FOUND,
        OrderError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        OrderError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
        OrderError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ApiError::from_error(&self))).into_response()
    }
}

/// Map a body that failed to deserialize into a validation error
pub(crate) fn body_error(rejection: JsonRejection) -> OrderError {
    OrderError::Validation(rejection.body_text())
}

/// Map a path segment that is not a valid order id into a validation error
pub(crate) fn path_error(rejection: PathRejection) -> OrderError {
    OrderError::Validation(rejection.body_text())
}

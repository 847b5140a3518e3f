//! Order endpoints

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{body_error, path_error};
use crate::api::state::AppState;
use crate::error::{OrderError, OrderResult};
use crate::lifecycle::ALL_STATUSES;
use crate::types::{LineItem, Order};

/// Query parameters for listing orders
#[derive(Debug, Deserialize)]
pub struct ListOrdersParams {
    /// `all` or an exact status
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    ALL_STATUSES.to_string()
}

/// Body of `POST /api/orders`
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub message: String,
    pub order: Order,
}

/// Body of `PUT /api/orders/:id/status`
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteOrderResponse {
    pub message: String,
    pub order_id: u64,
}

/// GET /api/orders?filter=all
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListOrdersParams>,
) -> OrderResult<Json<Vec<Order>>> {
    let orders = state.lifecycle.list_orders(&params.filter).await?;
    Ok(Json(orders))
}

/// POST /api/orders
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> OrderResult<(StatusCode, Json<CreateOrderResponse>)> {
    let Json(request) = body.map_err(body_error)?;
    let order = state
        .lifecycle
        .create_order(request.items, request.notes)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            message: "order created".to_string(),
            order,
        }),
    ))
}

/// PUT /api/orders/:id/status
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> OrderResult<Json<Order>> {
    let Path(order_id) = path.map_err(path_error)?;
    let Json(request) = body.map_err(body_error)?;
    let status = request
        .status
        .ok_or_else(|| OrderError::validation("status is required"))?;

    let order = state.lifecycle.update_status(order_id, &status).await?;
    Ok(Json(order))
}

/// DELETE /api/orders/:id
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> OrderResult<Json<DeleteOrderResponse>> {
    let Path(order_id) = path.map_err(path_error)?;
    state.lifecycle.delete_order(order_id).await?;
    Ok(Json(DeleteOrderResponse {
        message: "order deleted".to_string(),
        order_id,
    }))
}

//! Menu endpoint

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::api::state::AppState;
use crate::types::MenuItem;

/// GET /api/menu - Available items, grouped by category
pub async fn get_menu(State(state): State<Arc<AppState>>) -> Json<Vec<MenuItem>> {
    Json(state.menu.available())
}

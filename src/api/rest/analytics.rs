//! Sales analytics endpoint

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::analytics::ALL_CATEGORIES;
use crate::api::state::AppState;
use crate::error::OrderResult;
use crate::types::AnalyticsResult;

#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    /// `today`, `yesterday`, `last_7_days` or `YYYY-MM-DD`
    #[serde(default = "default_date")]
    pub date: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_date() -> String {
    "today".to_string()
}

fn default_category() -> String {
    ALL_CATEGORIES.to_string()
}

/// GET /api/analytics?date=today&category=all
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyticsParams>,
) -> OrderResult<Json<AnalyticsResult>> {
    let result = state
        .analytics
        .sales(&params.date, &params.category)
        .await?;
    Ok(Json(result))
}

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use stockdesk_core::rules::RuleSet;

use crate::{error::ApiResult, main_lib::AppState};

/// Thresholds plus every rulebook entry, in file order.
async fn get_rules(State(state): State<Arc<AppState>>) -> ApiResult<Json<RuleSet>> {
    Ok(Json(state.reference.rules().clone()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/rules", get(get_rules))
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use stockdesk_core::baskets::{rebalance, Basket, RebalancePlan};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct RebalanceRequest {
    capital: Decimal,
}

async fn get_baskets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Basket>>> {
    Ok(Json(state.reference.baskets().to_vec()))
}

async fn rebalance_basket(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<RebalanceRequest>,
) -> ApiResult<Json<RebalancePlan>> {
    let basket = state
        .reference
        .basket(&name)
        .ok_or_else(|| ApiError::NotFound(format!("Basket '{}' not found", name)))?;
    let plan = rebalance(basket, request.capital, state.prices.as_ref()).await?;
    Ok(Json(plan))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/baskets", get(get_baskets))
        .route("/baskets/{name}/rebalance", post(rebalance_basket))
}

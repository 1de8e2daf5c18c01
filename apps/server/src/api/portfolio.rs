use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use stockdesk_core::{
    rules::{daily_review, ReviewRow},
    valuation::{
        aggregate, compute_metrics, summarize, AggregationMode, PortfolioAggregate,
        PortfolioSummary, ValuedHolding,
    },
};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct AggregateQuery {
    mode: Option<AggregationMode>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardSummary {
    #[serde(flatten)]
    summary: PortfolioSummary,
    active_baskets: usize,
}

async fn valued_holdings(state: &AppState) -> ApiResult<Vec<ValuedHolding>> {
    let holdings = state.holdings_snapshot()?;
    Ok(compute_metrics(&holdings, state.prices.as_ref()).await)
}

async fn get_metrics(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ValuedHolding>>> {
    Ok(Json(valued_holdings(&state).await?))
}

async fn get_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<DashboardSummary>> {
    let valued = valued_holdings(&state).await?;
    Ok(Json(DashboardSummary {
        summary: summarize(&valued),
        active_baskets: state.reference.baskets().len(),
    }))
}

async fn get_aggregate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AggregateQuery>,
) -> ApiResult<Json<PortfolioAggregate>> {
    let valued = valued_holdings(&state).await?;
    Ok(Json(aggregate(&valued, query.mode.unwrap_or_default())))
}

async fn get_review(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ReviewRow>>> {
    let valued = valued_holdings(&state).await?;
    Ok(Json(daily_review(&valued, state.reference.rules())))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio/metrics", get(get_metrics))
        .route("/portfolio/summary", get(get_summary))
        .route("/portfolio/aggregate", get(get_aggregate))
        .route("/portfolio/review", get(get_review))
}

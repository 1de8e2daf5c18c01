use axum::{routing::post, Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stockdesk_core::valuation::{average_price, PurchaseLot};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct AveragePriceRequest {
    lots: Vec<PurchaseLot>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AveragePriceResponse {
    average_price: Option<Decimal>,
}

async fn calculate_average_price(
    Json(request): Json<AveragePriceRequest>,
) -> ApiResult<Json<AveragePriceResponse>> {
    Ok(Json(AveragePriceResponse {
        average_price: average_price(&request.lots)?,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/tools/average-price", post(calculate_average_price))
}

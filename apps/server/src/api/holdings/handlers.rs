use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use stockdesk_core::holdings::{import_holdings_csv, Holding, NewHolding};

use crate::{error::ApiResult, main_lib::AppState};

use super::dto::ImportHoldingsResult;

pub async fn get_holdings(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Holding>>> {
    Ok(Json(state.holdings_snapshot()?))
}

pub async fn upsert_holding(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewHolding>,
) -> ApiResult<Json<Holding>> {
    let holding = Holding::try_from(payload)?;
    let saved = holding.clone();
    let replaced = state.with_holdings_mut(|store| Ok(store.upsert(holding)))?;
    if replaced.is_some() {
        tracing::info!("Replaced holding {}", saved.symbol);
    } else {
        tracing::info!("Added holding {}", saved.symbol);
    }
    Ok(Json(saved))
}

pub async fn delete_holding(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let removed = state.with_holdings_mut(|store| store.remove(&symbol))?;
    tracing::info!("Removed holding {}", removed.symbol);
    Ok(StatusCode::NO_CONTENT)
}

/// Replaces every holding with the contents of a CSV body.
pub async fn import_holdings(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<ImportHoldingsResult>> {
    let imported = state.with_holdings_mut(|store| import_holdings_csv(store, &body))?;
    Ok(Json(ImportHoldingsResult { imported }))
}

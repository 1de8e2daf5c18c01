mod dto;
mod handlers;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::main_lib::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/holdings",
            get(handlers::get_holdings).post(handlers::upsert_holding),
        )
        .route("/holdings/import", post(handlers::import_holdings))
        .route("/holdings/{symbol}", delete(handlers::delete_holding))
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use stockdesk_core::notes::{Note, NoteUpdate, NotesStore};
use tokio::task;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Runs a notes store call off the async runtime; the store does file I/O.
async fn with_notes<T, F>(state: &AppState, op: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn NotesStore) -> stockdesk_core::Result<T> + Send + 'static,
{
    let notes = Arc::clone(&state.notes);
    let result = task::spawn_blocking(move || op(notes.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(format!("Notes task failed: {}", e)))?;
    Ok(result?)
}

async fn list_notes(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Note>>> {
    Ok(Json(with_notes(&state, |notes| notes.list_notes()).await?))
}

async fn save_note(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<NoteUpdate>,
) -> ApiResult<Json<Note>> {
    let note = with_notes(&state, move |notes| notes.save_note(&symbol, &update.text)).await?;
    Ok(Json(note))
}

async fn delete_note(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    with_notes(&state, move |notes| notes.delete_note(&symbol)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notes", get(list_notes))
        .route("/notes/{symbol}", put(save_note).delete(delete_note))
}

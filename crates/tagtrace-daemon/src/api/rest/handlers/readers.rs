//! Reader view handlers

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use crate::presence::{live_view_stream, reader_view};
use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures_util::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tagtrace_types::{Reader, ReaderId, ReaderView};

/// List registered readers
pub async fn list_readers(State(state): State<AppState>) -> ApiResult<Json<Vec<Reader>>> {
    let mut readers = state.registry.list_readers().await?;
    readers.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(readers))
}

/// One-shot snapshot of a reader's current presence
pub async fn get_reader_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ReaderView>> {
    let reader_id = ReaderId::new(id);

    let view = reader_view(
        state.registry.as_ref(),
        &reader_id,
        &state.presence,
        chrono::Utc::now(),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("Reader {} not found", reader_id)))?;

    Ok(Json(view))
}

/// Stream a reader's view via SSE
///
/// The client gets the full current view immediately and a fresh full view
/// whenever it changes; it replaces its state on every message.
pub async fn stream_reader_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let reader_id = ReaderId::new(id);

    // Reject unknown readers before the stream starts, while we can still
    // answer with a status code.
    if state.registry.get_reader(&reader_id).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "Reader {} not found",
            reader_id
        )));
    }

    let stream = live_view_stream(
        state.registry.clone(),
        &state.bus,
        state.presence.clone(),
        reader_id,
    )
    .map(|view: ReaderView| {
        let json = serde_json::to_string(&view).unwrap_or_default();
        Ok(Event::default().data(json))
    });

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    ))
}

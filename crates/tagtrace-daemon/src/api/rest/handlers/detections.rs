//! Detection ingest handler

use crate::api::rest::state::AppState;
use crate::error::ApiResult;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tagtrace_types::{ReaderId, TagId};

/// Detection payload as posted by reader hardware
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDetectionRequest {
    /// Tag code read off the device
    pub tag_id: String,

    /// Reporting reader; passed through uninterpreted
    pub reader_id: String,

    /// Optional detection time; server clock when absent
    #[serde(default)]
    pub date_time: Option<chrono::DateTime<chrono::Utc>>,
}

/// Detection response
#[derive(Debug, Serialize)]
pub struct RecordDetectionResponse {
    pub success: bool,
}

/// Record a detection event
pub async fn record_detection(
    State(state): State<AppState>,
    Json(request): Json<RecordDetectionRequest>,
) -> ApiResult<Json<RecordDetectionResponse>> {
    let tag_id = TagId::new(request.tag_id);
    let reader_id = ReaderId::new(request.reader_id);

    state
        .ingest
        .record(&tag_id, reader_id, request.date_time)
        .await?;

    Ok(Json(RecordDetectionResponse { success: true }))
}

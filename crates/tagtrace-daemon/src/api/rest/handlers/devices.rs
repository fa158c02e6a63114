//! Device projection handlers

use crate::api::rest::state::AppState;
use crate::error::ApiResult;
use axum::{extract::State, Json};
use tagtrace_types::Device;

/// List registered devices
pub async fn list_devices(State(state): State<AppState>) -> ApiResult<Json<Vec<Device>>> {
    let mut devices = state.registry.list_devices().await?;
    devices.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(devices))
}

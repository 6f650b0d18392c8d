//! Public site-meta endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::error::ApiResult;
use crate::AppState;

/// The singleton, or the empty default shape when nothing has been
/// written yet.
pub(crate) async fn current(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let meta = state.store().current_meta()?.unwrap_or_default();
    Ok(Json(meta.to_external()))
}

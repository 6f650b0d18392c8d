//! Route handlers, grouped by entity.

pub(crate) mod admin;
pub(crate) mod contact;
pub(crate) mod experience;
pub(crate) mod meta;
pub(crate) mod projects;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::AppState;

/// Liveness plus a database probe.
pub(crate) async fn health(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state.store().ping()?;
    Ok(Json(json!({ "status": "ok" })))
}

//! Public experience endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use folio_model::Experience;

use crate::error::ApiResult;
use crate::AppState;

/// Most recent first, with the derived `duration` and `isCurrent`
/// fields evaluated against today.
pub(crate) async fn list(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let entries = state.store().list_experience()?;
    Ok(Json(Value::Array(
        entries.iter().map(Experience::to_external).collect(),
    )))
}

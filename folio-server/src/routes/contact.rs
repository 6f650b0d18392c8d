//! Anonymous contact submission.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, warn};

use folio_model::{fields, validate_contact_message};

use crate::error::ApiResult;
use crate::AppState;

/// Validate, persist, then notify. The notification is best-effort:
/// its failure is logged and the submission still succeeds.
pub(crate) async fn submit(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let canonical = fields::internalize_keys(body);
    let message = validate_contact_message(&canonical)?;

    let stored = state.store().insert_contact_message(&message)?;
    if let Err(e) = state.notifier().contact_received(&stored) {
        warn!("contact notification failed: {e}");
    }
    info!(id = stored.id, "contact message received");

    Ok((StatusCode::CREATED, Json(json!({ "id": stored.id }))))
}

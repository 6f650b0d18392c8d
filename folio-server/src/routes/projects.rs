//! Public project endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use folio_model::Project;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Deserialize)]
pub(crate) struct ListQuery {
    featured: Option<String>,
}

/// Accepts the usual boolean spellings; anything else is a validation
/// error rather than a silently unfiltered listing.
fn parse_featured(raw: &str) -> Result<bool, ApiError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ApiError::field(
            "featured",
            "Must be one of: true, 1, yes, false, 0, no",
        )),
    }
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Value>> {
    let featured = query.featured.as_deref().map(parse_featured).transpose()?;
    let projects = state.store().list_projects(featured)?;
    Ok(Json(Value::Array(
        projects.iter().map(Project::to_external).collect(),
    )))
}

pub(crate) async fn by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Value>> {
    let project = state
        .store()
        .project_by_slug(&slug)?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(project.to_external()))
}

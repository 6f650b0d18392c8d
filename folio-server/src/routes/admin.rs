//! Admin surface: console-form writes, uploads and contact triage.
//!
//! Every handler takes an [`AdminSession`], the only proof of
//! authorization in the system.

use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use folio_model::admin::{stored_image_path, ExperienceForm, ProjectForm, SiteMetaForm};
use folio_model::ContactMessage;
use folio_storage::MetaImage;

use crate::auth::AdminSession;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

// ── Projects ─────────────────────────────────────────────────────

pub(crate) async fn create_project(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(form): Json<ProjectForm>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let store = state.store();
    let record = form.into_record(None, |slug| store.slug_owner(slug).ok().flatten())?;
    let stored = store.insert_project(&record)?;
    info!(id = stored.id, slug = %stored.slug, "project created");
    Ok((StatusCode::CREATED, Json(stored.to_external())))
}

pub(crate) async fn update_project(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<ProjectForm>,
) -> ApiResult<Json<Value>> {
    let store = state.store();
    let mut record =
        form.into_record(Some(id), |slug| store.slug_owner(slug).ok().flatten())?;
    // The upload path owns the cover reference.
    record.cover_image = store.project_by_id(id)?.and_then(|p| p.cover_image);
    let stored = store.update_project(id, &record)?;
    info!(id, slug = %stored.slug, "project updated");
    Ok(Json(stored.to_external()))
}

/// Read-back in the flat-text editing shape.
pub(crate) async fn project_form(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ProjectForm>> {
    let project = state.store().project_by_id(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(ProjectForm::from_record(&project)))
}

pub(crate) async fn upload_cover(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let (filename, data) = receive_image(multipart).await?;
    let reference = store_image(&state, &filename, &data).await?;
    state.store().set_project_cover(id, &reference)?;
    info!(id, reference, "project cover updated");
    Ok(Json(json!({ "coverImage": reference })))
}

// ── Experience ───────────────────────────────────────────────────

pub(crate) async fn create_experience(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(form): Json<ExperienceForm>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let record = form.into_record()?;
    let stored = state.store().insert_experience(&record)?;
    info!(id = stored.id, company = %stored.company, "experience entry created");
    Ok((StatusCode::CREATED, Json(stored.to_external())))
}

pub(crate) async fn update_experience(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<ExperienceForm>,
) -> ApiResult<Json<Value>> {
    let record = form.into_record()?;
    let stored = state.store().update_experience(id, &record)?;
    info!(id, "experience entry updated");
    Ok(Json(stored.to_external()))
}

pub(crate) async fn experience_form(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ExperienceForm>> {
    let entry = state
        .store()
        .experience_by_id(id)?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(ExperienceForm::from_record(&entry)))
}

// ── Site meta ────────────────────────────────────────────────────

pub(crate) async fn meta_form(
    _session: AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<SiteMetaForm>> {
    let meta = state.store().current_meta()?.unwrap_or_default();
    Ok(Json(SiteMetaForm::from_record(&meta)))
}

pub(crate) async fn update_meta(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(form): Json<SiteMetaForm>,
) -> ApiResult<Json<Value>> {
    let store = state.store();
    let current = store.current_meta()?;
    let record = form.into_record(current.as_ref())?;
    let stored = store.upsert_meta(&record)?;
    info!("site meta updated");
    Ok(Json(stored.to_external()))
}

pub(crate) async fn upload_avatar(
    _session: AdminSession,
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<Value>> {
    upload_meta_image(state, MetaImage::Avatar, multipart).await
}

pub(crate) async fn upload_profile(
    _session: AdminSession,
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<Value>> {
    upload_meta_image(state, MetaImage::Profile, multipart).await
}

async fn upload_meta_image(
    state: AppState,
    target: MetaImage,
    multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let (filename, data) = receive_image(multipart).await?;
    let reference = store_image(&state, &filename, &data).await?;
    let meta = state.store().set_meta_image(target, &reference)?;
    info!(?target, reference, "site-meta image updated");
    Ok(Json(meta.to_external()))
}

// ── Contact triage ───────────────────────────────────────────────

pub(crate) async fn list_contact(
    _session: AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    let messages = state.store().list_contact_messages()?;
    Ok(Json(Value::Array(
        messages.iter().map(ContactMessage::to_external).collect(),
    )))
}

#[derive(Deserialize)]
pub(crate) struct RepliedPatch {
    replied: bool,
}

pub(crate) async fn set_replied(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<RepliedPatch>,
) -> ApiResult<Json<Value>> {
    let updated = state.store().set_replied(id, patch.replied)?;
    info!(id, replied = patch.replied, "contact message triaged");
    Ok(Json(updated.to_external()))
}

// ── Upload plumbing ──────────────────────────────────────────────

/// Pull the `file` part out of a multipart upload.
async fn receive_image(mut multipart: Multipart) -> ApiResult<(String, Bytes)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::field("file", "Upload payload could not be read"))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|_| ApiError::field("file", "Upload payload could not be read"))?;
            return Ok((filename, data));
        }
    }
    Err(ApiError::field("file", "No file part in the upload"))
}

/// Validate the filename, write the bytes under the content directory
/// and return the stored relative reference.
async fn store_image(state: &AppState, filename: &str, data: &[u8]) -> ApiResult<String> {
    let reference = stored_image_path(filename)?;
    let name = reference.rsplit('/').next().unwrap_or(&reference).to_string();

    let dir = state.images_dir();
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| ApiError::Server(e.to_string()))?;
    tokio::fs::write(dir.join(&name), data)
        .await
        .map_err(|e| ApiError::Server(e.to_string()))?;
    Ok(reference)
}

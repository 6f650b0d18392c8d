//! HTTP API for the Folio portfolio backend.
//!
//! Public read endpoints, anonymous contact submission, and a
//! bearer-token admin surface over the validation core and the SQLite
//! content store. Uploaded images are served statically from the
//! content directory.

pub mod auth;
pub mod error;
pub mod notify;
mod routes;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::services::ServeDir;

use folio_storage::ContentStore;

use crate::notify::Notifier;

/// Shared server state: the content store behind a mutex (SQLite
/// connections are single-threaded), the notification collaborator and
/// the admin credential.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<ContentStore>>,
    notifier: Arc<dyn Notifier>,
    admin_token: Arc<str>,
    content_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(
        store: ContentStore,
        notifier: Arc<dyn Notifier>,
        admin_token: &str,
        content_dir: PathBuf,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            notifier,
            admin_token: Arc::from(admin_token),
            content_dir: Arc::new(content_dir),
        }
    }

    /// Lock the content store for the duration of one handler step.
    pub fn store(&self) -> MutexGuard<'_, ContentStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn admin_token(&self) -> &str {
        &self.admin_token
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Directory where uploaded images land on disk.
    pub(crate) fn images_dir(&self) -> PathBuf {
        self.content_dir.join("images").join("projects")
    }
}

/// Build the HTTP API router with the given state.
pub fn build_router(state: AppState) -> Router {
    let content_root = state.content_dir.as_ref().clone();
    Router::new()
        .route("/health", get(routes::health))
        // Public read API + contact submission
        .route("/api/projects", get(routes::projects::list))
        .route("/api/projects/{slug}", get(routes::projects::by_slug))
        .route("/api/experience", get(routes::experience::list))
        .route("/api/meta", get(routes::meta::current))
        .route("/api/contact", post(routes::contact::submit))
        // Admin surface (bearer token)
        .route("/api/admin/projects", post(routes::admin::create_project))
        .route(
            "/api/admin/projects/{id}",
            get(routes::admin::project_form).put(routes::admin::update_project),
        )
        .route(
            "/api/admin/projects/{id}/cover",
            post(routes::admin::upload_cover),
        )
        .route(
            "/api/admin/experience",
            post(routes::admin::create_experience),
        )
        .route(
            "/api/admin/experience/{id}",
            get(routes::admin::experience_form).put(routes::admin::update_experience),
        )
        .route(
            "/api/admin/meta",
            get(routes::admin::meta_form).put(routes::admin::update_meta),
        )
        .route("/api/admin/meta/avatar", post(routes::admin::upload_avatar))
        .route(
            "/api/admin/meta/profile",
            post(routes::admin::upload_profile),
        )
        .route("/api/admin/contact", get(routes::admin::list_contact))
        .route("/api/admin/contact/{id}", patch(routes::admin::set_replied))
        // Uploaded images
        .nest_service("/content", ServeDir::new(content_root))
        .with_state(state)
}

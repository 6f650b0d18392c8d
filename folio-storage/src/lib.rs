//! SQLite content store for Folio.
//!
//! Persists the four entity kinds behind the validation core:
//! projects, experience entries, contact messages and the site-meta
//! singleton. List-shaped fields are stored as JSON text; dates and
//! timestamps as ISO text columns.
//!
//! The store is a thin collaborator: it never validates. Callers run
//! records through `folio-model` first and perform the slug-uniqueness
//! probe in the same session as the write; the UNIQUE index on project
//! slugs remains the backstop for races.

mod error;
mod store;

pub use error::{StorageError, StorageResult};
pub use store::{ContentStore, MetaImage};

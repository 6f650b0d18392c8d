//! Content schemas and validation engine for the Folio portfolio backend.
//!
//! This crate is the pure core of the system: it defines the shape,
//! validity and transformation of content records as they cross the
//! boundary between storage and the outside world.
//!
//! - [`fields`] — snake_case ⇄ camelCase identifier transform, applied at
//!   schema construction and at the wire boundary
//! - [`EntitySchema`] / [`FieldSpec`] — declarative per-entity field
//!   descriptions (types, constraints, access modes)
//! - [`Violations`] — non-short-circuiting validation report, keyed by
//!   field with a `_schema` pseudo-key for cross-field rules
//! - [`admin`] — the console transform layer (flat text ⇄ structured
//!   lists, slug resolution, upload filename sanitization)
//!
//! The crate holds no entity state and performs no I/O: every entry
//! point is a pure function of (candidate data, optional existing-record
//! context) to (normalized record | violations).

pub mod admin;
pub mod fields;

mod contact;
mod error;
mod experience;
mod meta;
mod project;
mod schema;

pub use contact::{contact_message_schema, validate_contact_message, ContactMessage};
pub use error::{AdminError, Violations, SCHEMA_KEY};
pub use experience::{
    duration_between, experience_schema, validate_experience, validate_experience_as_of,
    Experience,
};
pub use meta::{
    site_meta_schema, social_link_schema, validate_site_meta, SiteMeta, SocialLink,
};
pub use project::{project_schema, validate_project, Project};
pub use schema::{
    Access, EntitySchema, FieldKind, FieldSpec, UnknownKeys, DATETIME_FORMAT, DATE_FORMAT,
};

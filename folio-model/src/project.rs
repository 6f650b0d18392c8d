//! Project entity: schema, validation and external representation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Violations;
use crate::fields;
use crate::schema::{as_object, from_writable, EntitySchema, FieldSpec, UnknownKeys};

/// Canonical (storage-shaped) portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub short_desc: Option<String>,
    /// Long-form body, markdown-flavored.
    #[serde(default)]
    pub long_md: Option<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order_index: i64,
    /// Set once by storage on insert, immutable afterwards.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Project {
    /// External (wire) representation with camelCase keys.
    #[must_use]
    pub fn to_external(&self) -> Value {
        let value = serde_json::to_value(self).expect("project serializes to JSON");
        fields::externalize_keys(value)
    }
}

/// Schema description for [`Project`].
#[must_use]
pub fn project_schema() -> EntitySchema {
    EntitySchema {
        entity_type: "project",
        fields: vec![
            FieldSpec::int("id").read_only(),
            FieldSpec::str("title").required().min_len(1).max_len(200),
            FieldSpec::slug("slug").required().max_len(200),
            FieldSpec::str("short_desc").max_len(500),
            FieldSpec::str("long_md"),
            FieldSpec::str_list("tech"),
            FieldSpec::url("github_url").max_len(500),
            FieldSpec::url("demo_url").max_len(500),
            FieldSpec::str("cover_image").max_len(500),
            FieldSpec::bool("featured"),
            FieldSpec::int("order_index"),
            FieldSpec::datetime("created_at").read_only(),
        ],
        unknown_keys: UnknownKeys::Ignore,
    }
}

/// Validate a candidate project record in canonical internal shape,
/// collecting every violation, and normalize it on success (absent
/// `tech` becomes empty, `featured` false, `order_index` 0).
pub fn validate_project(data: &Value) -> Result<Project, Violations> {
    let obj = as_object(data)?;
    let schema = project_schema();
    schema.check(obj).into_result()?;
    from_writable(&schema, obj)
}

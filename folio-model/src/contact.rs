//! Contact message entity: public-submission schema and validation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Violations;
use crate::fields;
use crate::schema::{as_object, from_writable, EntitySchema, FieldSpec, UnknownKeys};

/// Canonical contact-form submission. Created by anonymous visitors,
/// mutated only to flip `replied`, never deleted through the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub message: String,
    /// Set by storage on arrival, immutable afterwards.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// Mutable only by the administrator.
    #[serde(default)]
    pub replied: bool,
}

impl ContactMessage {
    /// External (wire) representation with camelCase keys.
    #[must_use]
    pub fn to_external(&self) -> Value {
        let value = serde_json::to_value(self).expect("contact message serializes to JSON");
        fields::externalize_keys(value)
    }
}

/// Schema description for [`ContactMessage`]. Unknown keys are rejected:
/// this is the one schema fed directly by anonymous submissions.
#[must_use]
pub fn contact_message_schema() -> EntitySchema {
    EntitySchema {
        entity_type: "contact_message",
        fields: vec![
            FieldSpec::int("id").read_only(),
            FieldSpec::str("name").required().min_len(1).max_len(200),
            FieldSpec::email("email").required().max_len(200),
            FieldSpec::str("message").required().min_len(10).max_len(5000),
            FieldSpec::datetime("created_at").read_only(),
            FieldSpec::bool("replied").read_only(),
        ],
        unknown_keys: UnknownKeys::Reject,
    }
}

/// Validate a candidate contact submission, collecting every violation.
///
/// A message whose trimmed length falls below 10 characters is reported
/// as a schema-level violation even when the raw length passes the
/// field-level bound.
pub fn validate_contact_message(data: &Value) -> Result<ContactMessage, Violations> {
    let obj = as_object(data)?;
    let schema = contact_message_schema();
    let mut v = schema.check(obj);

    if let Some(message) = obj.get("message").and_then(Value::as_str) {
        if message.trim().chars().count() < 10 {
            v.add_schema("Message must be at least 10 characters long");
        }
    }

    v.into_result()?;
    from_writable(&schema, obj)
}

//! Validation error collection.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::fields;

/// Pseudo-key under which cross-field (schema-level) violations are
/// reported, as opposed to violations attached to a single field.
pub const SCHEMA_KEY: &str = "_schema";

/// An insertion-ordered collection of field -> message violations.
///
/// The validation engine never short-circuits: every rule runs and every
/// failure is recorded here, so one corrected resubmission can fix
/// everything reported. Fields are keyed by their internal names; the
/// external report maps them through [`fields::to_external`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    entries: Vec<(String, Vec<String>)>,
}

impl Violations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation against a field (internal name).
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        if let Some((_, msgs)) = self.entries.iter_mut().find(|(f, _)| f == field) {
            msgs.push(message);
        } else {
            self.entries.push((field.to_string(), vec![message]));
        }
    }

    /// Record a schema-level violation under [`SCHEMA_KEY`].
    pub fn add_schema(&mut self, message: impl Into<String>) {
        self.add(SCHEMA_KEY, message);
    }

    /// Fold another collection into this one, preserving order.
    pub fn merge(&mut self, other: Violations) {
        for (field, msgs) in other.entries {
            for msg in msgs {
                self.add(&field, msg);
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields with at least one violation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Messages recorded against a field (internal name), if any.
    #[must_use]
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, msgs)| msgs.as_slice())
    }

    /// Iterate over `(field, messages)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(f, msgs)| (f.as_str(), msgs.as_slice()))
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Build the external error report: a JSON object keyed by external
    /// field names mapping to message lists. [`SCHEMA_KEY`] is kept
    /// verbatim.
    #[must_use]
    pub fn to_external_value(&self) -> Value {
        let mut map = Map::new();
        for (field, msgs) in &self.entries {
            let key = if field == SCHEMA_KEY {
                field.clone()
            } else {
                fields::to_external(field)
            };
            map.insert(
                key,
                Value::Array(msgs.iter().cloned().map(Value::String).collect()),
            );
        }
        Value::Object(map)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, msgs) in &self.entries {
            for msg in msgs {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {msg}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Failure modes of the admin (console) transform layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdminError {
    /// One or more field or cross-field constraint violations.
    #[error("validation failed: {0}")]
    Validation(Violations),

    /// Another record already owns the requested slug.
    #[error("slug '{0}' already exists, choose a different title or slug")]
    SlugConflict(String),
}

impl From<Violations> for AdminError {
    fn from(v: Violations) -> Self {
        AdminError::Validation(v)
    }
}

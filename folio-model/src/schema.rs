//! Schema descriptions and the generic field-level validation pass.
//!
//! Each entity kind declares an [`EntitySchema`]: a list of [`FieldSpec`]s
//! carrying type, access mode and constraints. The external name of every
//! field is computed once, at construction, via [`fields::to_external`] —
//! there is no runtime reflection. [`EntitySchema::check`] runs the
//! field-level rules and accumulates every violation; cross-field rules
//! live with the entity modules and merge into the same collection.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use url::Url;

use crate::error::Violations;
use crate::fields;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("slug pattern compiles"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

/// Calendar date wire format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Combined date-time wire format (optional fractional seconds).
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// External-facing type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Int,
    Bool,
    Date,
    DateTime,
    Url,
    Email,
    Slug,
    StrList,
    LinkList,
}

/// Who may write a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Accepted on write, returned on read.
    ReadWrite,
    /// Server-assigned; never accepted from a caller.
    ReadOnly,
    /// Accepted on write, never returned on read.
    WriteOnly,
}

/// Policy for data keys that match no writable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownKeys {
    /// Drop silently (store-triggered endpoints).
    Ignore,
    /// Reject with a violation (public submission endpoint).
    Reject,
}

/// Declaration of a single schema field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    /// External identifier, computed at construction.
    pub external: String,
    pub kind: FieldKind,
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub access: Access,
}

impl FieldSpec {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            external: fields::to_external(name),
            kind,
            required: false,
            min_len: None,
            max_len: None,
            access: Access::ReadWrite,
        }
    }

    /// Shorthand for a free-text field.
    pub fn str(name: &'static str) -> Self {
        Self::new(name, FieldKind::Str)
    }

    /// Shorthand for an integer field.
    pub fn int(name: &'static str) -> Self {
        Self::new(name, FieldKind::Int)
    }

    /// Shorthand for a boolean field.
    pub fn bool(name: &'static str) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    /// Shorthand for a `YYYY-MM-DD` calendar date field.
    pub fn date(name: &'static str) -> Self {
        Self::new(name, FieldKind::Date)
    }

    /// Shorthand for a combined date-time field.
    pub fn datetime(name: &'static str) -> Self {
        Self::new(name, FieldKind::DateTime)
    }

    /// Shorthand for an absolute-URL field.
    pub fn url(name: &'static str) -> Self {
        Self::new(name, FieldKind::Url)
    }

    /// Shorthand for an email-address field.
    pub fn email(name: &'static str) -> Self {
        Self::new(name, FieldKind::Email)
    }

    /// Shorthand for a URL-slug field.
    pub fn slug(name: &'static str) -> Self {
        Self::new(name, FieldKind::Slug)
    }

    /// Shorthand for an ordered list of strings.
    pub fn str_list(name: &'static str) -> Self {
        Self::new(name, FieldKind::StrList)
    }

    /// Shorthand for a nested social-link list.
    pub fn link_list(name: &'static str) -> Self {
        Self::new(name, FieldKind::LinkList)
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn min_len(mut self, n: usize) -> Self {
        self.min_len = Some(n);
        self
    }

    #[must_use]
    pub fn max_len(mut self, n: usize) -> Self {
        self.max_len = Some(n);
        self
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.access = Access::ReadOnly;
        self
    }

    #[must_use]
    pub fn write_only(mut self) -> Self {
        self.access = Access::WriteOnly;
        self
    }
}

/// Declares the fields and key policy of one entity kind.
#[derive(Debug, Clone)]
pub struct EntitySchema {
    pub entity_type: &'static str,
    pub fields: Vec<FieldSpec>,
    pub unknown_keys: UnknownKeys,
}

impl EntitySchema {
    /// Look up a field spec by internal name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Run the field-level validation pass over a candidate record in
    /// canonical internal shape. Collects every violation; never stops
    /// at the first failure.
    #[must_use]
    pub fn check(&self, data: &Map<String, Value>) -> Violations {
        let mut v = Violations::new();

        if matches!(self.unknown_keys, UnknownKeys::Reject) {
            for key in data.keys() {
                let writable = self
                    .field(key)
                    .is_some_and(|f| !matches!(f.access, Access::ReadOnly));
                if !writable {
                    v.add(key, "Unknown field");
                }
            }
        }

        for spec in &self.fields {
            if matches!(spec.access, Access::ReadOnly) {
                continue;
            }
            match data.get(spec.name) {
                None | Some(Value::Null) => {
                    if spec.required {
                        v.add(spec.name, "This field is required");
                    }
                }
                Some(value) => check_value(spec, value, &mut v),
            }
        }
        v
    }

    /// Strip read-only fields, nulls and (on `Ignore` schemas) unknown
    /// keys from a candidate record, leaving only writable data.
    #[must_use]
    pub fn writable(&self, data: &Map<String, Value>) -> Map<String, Value> {
        data.iter()
            .filter(|(key, value)| {
                !value.is_null()
                    && self
                        .field(key)
                        .is_some_and(|f| !matches!(f.access, Access::ReadOnly))
            })
            .map(|(k, val)| (k.clone(), val.clone()))
            .collect()
    }
}

fn check_value(spec: &FieldSpec, value: &Value, v: &mut Violations) {
    match spec.kind {
        FieldKind::Str | FieldKind::Slug | FieldKind::Email | FieldKind::Url => {
            let Some(s) = value.as_str() else {
                v.add(spec.name, "Must be a string");
                return;
            };
            check_length(spec, s, v);
            match spec.kind {
                FieldKind::Slug => {
                    if !SLUG_RE.is_match(s) {
                        v.add(
                            spec.name,
                            "Must contain only lowercase letters, numbers, and hyphens",
                        );
                    }
                }
                FieldKind::Email => {
                    if !EMAIL_RE.is_match(s) {
                        v.add(spec.name, "Not a valid email address");
                    }
                }
                FieldKind::Url => {
                    if Url::parse(s).is_err() {
                        v.add(spec.name, "Not a valid URL");
                    }
                }
                _ => {}
            }
        }
        FieldKind::Int => {
            if !value.is_i64() && !value.is_u64() {
                v.add(spec.name, "Must be an integer");
            }
        }
        FieldKind::Bool => {
            if !value.is_boolean() {
                v.add(spec.name, "Must be a boolean");
            }
        }
        FieldKind::Date => match value.as_str() {
            Some(s) if NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok() => {}
            _ => v.add(spec.name, "Not a valid date, expected YYYY-MM-DD"),
        },
        FieldKind::DateTime => match value.as_str() {
            Some(s) if NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).is_ok() => {}
            _ => v.add(spec.name, "Not a valid timestamp"),
        },
        FieldKind::StrList => match value.as_array() {
            Some(items) if items.iter().all(Value::is_string) => {}
            _ => v.add(spec.name, "Must be a list of strings"),
        },
        FieldKind::LinkList => {
            // Entries are validated by the nested link schema in the
            // site-meta rules; only the container shape is checked here.
            if !value.is_array() {
                v.add(spec.name, "Must be a list");
            }
        }
    }
}

fn check_length(spec: &FieldSpec, s: &str, v: &mut Violations) {
    let len = s.chars().count();
    if let Some(min) = spec.min_len {
        if len < min {
            v.add(spec.name, format!("Must be at least {min} characters"));
        }
    }
    if let Some(max) = spec.max_len {
        if len > max {
            v.add(spec.name, format!("Must be at most {max} characters"));
        }
    }
}

/// Interpret a candidate value as an object, or report the standard
/// schema-level violation.
pub(crate) fn as_object(data: &Value) -> Result<&Map<String, Value>, Violations> {
    data.as_object().ok_or_else(|| {
        let mut v = Violations::new();
        v.add_schema("Invalid input type, expected an object");
        v
    })
}

/// Deserialize the writable portion of a checked record into its
/// canonical struct, filling declared defaults for absent fields.
pub(crate) fn from_writable<T: serde::de::DeserializeOwned>(
    schema: &EntitySchema,
    obj: &Map<String, Value>,
) -> Result<T, Violations> {
    serde_json::from_value(Value::Object(schema.writable(obj))).map_err(|e| {
        let mut v = Violations::new();
        v.add_schema(format!("Invalid payload: {e}"));
        v
    })
}

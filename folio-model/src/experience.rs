//! Experience entity: schema, validation, and the derived `duration` and
//! `isCurrent` fields computed at read time.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Violations;
use crate::fields;
use crate::schema::{
    as_object, from_writable, EntitySchema, FieldSpec, UnknownKeys, DATE_FORMAT,
};

/// Canonical (storage-shaped) work-experience entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub id: Option<i64>,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date: NaiveDate,
    /// `None` means "current position".
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub order_index: i64,
}

impl Experience {
    /// True iff the position has no end date.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }

    /// Derived duration string evaluated against `today` (used as the
    /// effective end date for current positions).
    #[must_use]
    pub fn duration_as_of(&self, today: NaiveDate) -> String {
        duration_between(self.start_date, self.end_date.unwrap_or(today))
    }

    /// External representation with camelCase keys plus the derived
    /// `duration` and `isCurrent` fields, evaluated against `today`.
    #[must_use]
    pub fn to_external_as_of(&self, today: NaiveDate) -> Value {
        let mut value = serde_json::to_value(self).expect("experience serializes to JSON");
        if let Some(map) = value.as_object_mut() {
            map.insert(
                "duration".to_string(),
                Value::String(self.duration_as_of(today)),
            );
            map.insert("is_current".to_string(), Value::Bool(self.is_current()));
        }
        fields::externalize_keys(value)
    }

    /// External representation evaluated against the wall clock.
    #[must_use]
    pub fn to_external(&self) -> Value {
        self.to_external_as_of(Local::now().date_naive())
    }
}

/// Render the span between two dates as "N yr(s) M mo(s)".
///
/// Pluralizes only when the count differs from 1; a span under one month
/// renders as the literal "Less than 1 month".
#[must_use]
pub fn duration_between(start: NaiveDate, end: NaiveDate) -> String {
    let mut years = end.year() - start.year();
    let mut months = end.month() as i32 - start.month() as i32;
    if months < 0 {
        years -= 1;
        months += 12;
    }

    let yr_s = if years == 1 { "" } else { "s" };
    let mo_s = if months == 1 { "" } else { "s" };
    if years > 0 && months > 0 {
        format!("{years} yr{yr_s} {months} mo{mo_s}")
    } else if years > 0 {
        format!("{years} yr{yr_s}")
    } else if months > 0 {
        format!("{months} mo{mo_s}")
    } else {
        "Less than 1 month".to_string()
    }
}

/// Schema description for [`Experience`].
#[must_use]
pub fn experience_schema() -> EntitySchema {
    EntitySchema {
        entity_type: "experience",
        fields: vec![
            FieldSpec::int("id").read_only(),
            FieldSpec::str("company").required().min_len(1).max_len(200),
            FieldSpec::str("role").required().min_len(1).max_len(200),
            FieldSpec::str("location").max_len(200),
            FieldSpec::date("start_date").required(),
            FieldSpec::date("end_date"),
            FieldSpec::str_list("bullets"),
            FieldSpec::str_list("tech"),
            FieldSpec::int("order_index"),
        ],
        unknown_keys: UnknownKeys::Ignore,
    }
}

/// Validate a candidate experience record against a reference date for
/// the not-in-the-future rule. All violations are collected in one pass.
pub fn validate_experience_as_of(
    data: &Value,
    today: NaiveDate,
) -> Result<Experience, Violations> {
    let obj = as_object(data)?;
    let schema = experience_schema();
    let mut v = schema.check(obj);
    date_rules(obj, today, &mut v);
    v.into_result()?;
    from_writable(&schema, obj)
}

/// Validate a candidate experience record against the wall clock.
pub fn validate_experience(data: &Value) -> Result<Experience, Violations> {
    validate_experience_as_of(data, Local::now().date_naive())
}

fn date_rules(obj: &Map<String, Value>, today: NaiveDate, v: &mut Violations) {
    let start = parse_date(obj, "start_date");
    let end = parse_date(obj, "end_date");

    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            v.add_schema("End date must be after start date");
        }
    }
    if let Some(start) = start {
        if start > today {
            v.add_schema("Start date cannot be in the future");
        }
    }
}

fn parse_date(obj: &Map<String, Value>, field: &str) -> Option<NaiveDate> {
    obj.get(field)
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
}

use chrono::NaiveDate;
use folio_model::{
    duration_between, validate_experience_as_of, Experience, SCHEMA_KEY,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn reference_today() -> NaiveDate {
    date(2024, 3, 1)
}

// ── Derived duration ─────────────────────────────────────────────

#[test]
fn open_ended_position_measured_against_reference_date() {
    let e = validate_experience_as_of(
        &json!({"company": "Acme", "role": "Engineer", "start_date": "2022-03-01"}),
        reference_today(),
    )
    .unwrap();
    assert_eq!(e.duration_as_of(reference_today()), "2 yrs");
    assert!(e.is_current());
}

#[test]
fn closed_position_duration_is_deterministic() {
    let e = validate_experience_as_of(
        &json!({
            "company": "Acme",
            "role": "Engineer",
            "start_date": "2022-03-01",
            "end_date": "2022-06-01",
        }),
        reference_today(),
    )
    .unwrap();
    // The reference date is irrelevant once an end date is set.
    assert_eq!(e.duration_as_of(reference_today()), "3 mos");
    assert_eq!(e.duration_as_of(date(2030, 1, 1)), "3 mos");
    assert!(!e.is_current());
}

#[test]
fn duration_combines_years_and_months() {
    assert_eq!(
        duration_between(date(2020, 1, 15), date(2021, 3, 15)),
        "1 yr 2 mos"
    );
}

#[test]
fn duration_pluralizes_only_when_count_is_not_one() {
    assert_eq!(duration_between(date(2023, 1, 1), date(2023, 2, 1)), "1 mo");
    assert_eq!(duration_between(date(2023, 1, 1), date(2024, 1, 1)), "1 yr");
    assert_eq!(duration_between(date(2021, 1, 1), date(2024, 6, 1)), "3 yrs 5 mos");
}

#[test]
fn duration_borrows_a_year_when_months_go_negative() {
    // 2022-11 -> 2024-02: 1 yr 3 mos, not 2 yrs -9 mos.
    assert_eq!(duration_between(date(2022, 11, 5), date(2024, 2, 5)), "1 yr 3 mos");
}

#[test]
fn duration_under_one_month_uses_literal() {
    assert_eq!(
        duration_between(date(2024, 2, 1), date(2024, 2, 20)),
        "Less than 1 month"
    );
}

// ── Validation rules ─────────────────────────────────────────────

#[test]
fn end_date_equal_to_start_date_is_rejected() {
    let err = validate_experience_as_of(
        &json!({
            "company": "Acme",
            "role": "Engineer",
            "start_date": "2022-03-01",
            "end_date": "2022-03-01",
        }),
        reference_today(),
    )
    .unwrap_err();
    assert_eq!(
        err.messages(SCHEMA_KEY).unwrap(),
        &["End date must be after start date".to_string()]
    );
}

#[test]
fn start_date_in_the_future_is_rejected() {
    let err = validate_experience_as_of(
        &json!({"company": "Acme", "role": "Engineer", "start_date": "2024-03-02"}),
        reference_today(),
    )
    .unwrap_err();
    assert_eq!(
        err.messages(SCHEMA_KEY).unwrap(),
        &["Start date cannot be in the future".to_string()]
    );
}

#[test]
fn missing_required_fields_are_all_reported() {
    let err = validate_experience_as_of(&json!({}), reference_today()).unwrap_err();
    assert!(err.messages("company").is_some());
    assert!(err.messages("role").is_some());
    assert!(err.messages("start_date").is_some());
}

#[test]
fn malformed_date_is_a_field_violation() {
    let err = validate_experience_as_of(
        &json!({"company": "Acme", "role": "Engineer", "start_date": "01/03/2022"}),
        reference_today(),
    )
    .unwrap_err();
    assert_eq!(
        err.messages("start_date").unwrap(),
        &["Not a valid date, expected YYYY-MM-DD".to_string()]
    );
}

// ── External representation ──────────────────────────────────────

#[test]
fn external_form_carries_derived_fields() {
    let e = Experience {
        id: Some(7),
        company: "Acme".to_string(),
        role: "Engineer".to_string(),
        location: Some("Remote".to_string()),
        start_date: date(2022, 3, 1),
        end_date: None,
        bullets: vec!["Shipped the thing".to_string()],
        tech: vec!["Rust".to_string()],
        order_index: 1,
    };
    let ext = e.to_external_as_of(reference_today());
    assert_eq!(ext["startDate"], "2022-03-01");
    assert_eq!(ext["endDate"], serde_json::Value::Null);
    assert_eq!(ext["duration"], "2 yrs");
    assert_eq!(ext["isCurrent"], true);
    assert_eq!(ext["bullets"], json!(["Shipped the thing"]));
}

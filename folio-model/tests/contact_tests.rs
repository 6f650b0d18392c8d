use folio_model::{validate_contact_message, SCHEMA_KEY};
use pretty_assertions::assert_eq;
use serde_json::json;

fn valid_payload() -> serde_json::Value {
    json!({
        "name": "Ada",
        "email": "ada@example.com",
        "message": "I would like to talk about a project.",
    })
}

// ── Acceptance ───────────────────────────────────────────────────

#[test]
fn valid_submission_is_accepted() {
    let m = validate_contact_message(&valid_payload()).unwrap();
    assert_eq!(m.name, "Ada");
    assert_eq!(m.email, "ada@example.com");
    assert!(!m.replied);
    assert_eq!(m.id, None);
    assert_eq!(m.created_at, None);
}

// ── Message length rules ─────────────────────────────────────────

#[test]
fn whitespace_padding_does_not_satisfy_minimum_length() {
    // Raw length 11 passes the field-level bound; the trimmed content
    // is only 5 characters.
    let mut payload = valid_payload();
    payload["message"] = json!("   short   ");
    let err = validate_contact_message(&payload).unwrap_err();
    assert!(err.messages("message").is_none());
    assert_eq!(
        err.messages(SCHEMA_KEY).unwrap(),
        &["Message must be at least 10 characters long".to_string()]
    );
}

#[test]
fn short_message_reports_field_violation() {
    let mut payload = valid_payload();
    payload["message"] = json!("hi");
    let err = validate_contact_message(&payload).unwrap_err();
    assert_eq!(
        err.messages("message").unwrap(),
        &["Must be at least 10 characters".to_string()]
    );
}

#[test]
fn oversized_message_is_rejected() {
    let mut payload = valid_payload();
    payload["message"] = json!("x".repeat(5001));
    let err = validate_contact_message(&payload).unwrap_err();
    assert_eq!(
        err.messages("message").unwrap(),
        &["Must be at most 5000 characters".to_string()]
    );
}

// ── Email & unknown keys ─────────────────────────────────────────

#[test]
fn malformed_email_is_rejected() {
    for bad in ["no-at-sign", "a@b", "two@@example.com", "spaces in@example.com"] {
        let mut payload = valid_payload();
        payload["email"] = json!(bad);
        let err = validate_contact_message(&payload).unwrap_err();
        assert!(err.messages("email").is_some(), "{bad} should be rejected");
    }
}

#[test]
fn unknown_keys_are_rejected_at_the_public_endpoint() {
    let mut payload = valid_payload();
    payload["subject"] = json!("hello");
    let err = validate_contact_message(&payload).unwrap_err();
    assert_eq!(err.messages("subject").unwrap(), &["Unknown field".to_string()]);
}

#[test]
fn server_assigned_fields_cannot_be_submitted() {
    let mut payload = valid_payload();
    payload["replied"] = json!(true);
    let err = validate_contact_message(&payload).unwrap_err();
    assert_eq!(err.messages("replied").unwrap(), &["Unknown field".to_string()]);
}

#[test]
fn all_field_violations_surface_together() {
    let err = validate_contact_message(&json!({"email": "bad"})).unwrap_err();
    assert!(err.messages("name").is_some());
    assert!(err.messages("email").is_some());
    assert!(err.messages("message").is_some());
}

// ── External representation ──────────────────────────────────────

#[test]
fn external_form_uses_camel_case() {
    let m = validate_contact_message(&valid_payload()).unwrap();
    let ext = m.to_external();
    assert_eq!(ext["name"], "Ada");
    assert!(ext.get("createdAt").is_some());
    assert_eq!(ext["replied"], false);
}

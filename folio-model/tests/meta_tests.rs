use folio_model::{validate_site_meta, SCHEMA_KEY};
use pretty_assertions::assert_eq;
use serde_json::json;

fn github_link() -> serde_json::Value {
    json!({"platform": "GitHub", "url": "https://github.com/ada", "icon": "github"})
}

// ── Acceptance ───────────────────────────────────────────────────

#[test]
fn meta_with_links_is_accepted() {
    let meta = validate_site_meta(&json!({
        "hero_title": "Hi, I'm Ada",
        "hero_subtitle": "I build things",
        "bio_md": "## About",
        "social_links": [
            github_link(),
            {"platform": "LinkedIn", "url": "https://linkedin.com/in/ada", "icon": "linkedin"},
        ],
    }))
    .unwrap();
    assert_eq!(meta.social_links.len(), 2);
    assert_eq!(meta.social_links[0].platform, "GitHub");
}

#[test]
fn empty_meta_defaults_to_no_links() {
    let meta = validate_site_meta(&json!({})).unwrap();
    assert!(meta.social_links.is_empty());
    assert_eq!(meta.hero_title, None);
}

// ── Platform list rules ──────────────────────────────────────────

#[test]
fn duplicate_platforms_match_case_insensitively() {
    let err = validate_site_meta(&json!({
        "social_links": [
            {"platform": "GitHub", "url": "https://github.com/a", "icon": "github"},
            {"platform": "github", "url": "https://github.com/b", "icon": "github"},
        ],
    }))
    .unwrap_err();
    assert_eq!(
        err.messages(SCHEMA_KEY).unwrap(),
        &["Duplicate social media platform found".to_string()]
    );
}

#[test]
fn github_url_must_contain_canonical_domain() {
    let err = validate_site_meta(&json!({
        "social_links": [
            {"platform": "GitHub", "url": "https://gitlab.com/ada", "icon": "github"},
        ],
    }))
    .unwrap_err();
    assert_eq!(
        err.messages(SCHEMA_KEY).unwrap(),
        &["GitHub URL must contain github.com".to_string()]
    );
}

#[test]
fn twitter_accepts_either_domain() {
    for url in ["https://twitter.com/ada", "https://x.com/ada"] {
        let meta = validate_site_meta(&json!({
            "social_links": [{"platform": "Twitter", "url": url, "icon": "twitter"}],
        }));
        assert!(meta.is_ok(), "{url} should be accepted");
    }
    let err = validate_site_meta(&json!({
        "social_links": [
            {"platform": "twitter", "url": "https://mastodon.social/@ada", "icon": "twitter"},
        ],
    }))
    .unwrap_err();
    assert_eq!(
        err.messages(SCHEMA_KEY).unwrap(),
        &["Twitter URL must contain twitter.com or x.com".to_string()]
    );
}

#[test]
fn unrecognized_platforms_skip_the_domain_rule() {
    let meta = validate_site_meta(&json!({
        "social_links": [
            {"platform": "Mastodon", "url": "https://hachyderm.io/@ada", "icon": "mastodon"},
        ],
    }));
    assert!(meta.is_ok());
}

// ── Nested link validation ───────────────────────────────────────

#[test]
fn each_link_is_checked_by_the_nested_schema() {
    let err = validate_site_meta(&json!({
        "social_links": [
            github_link(),
            {"platform": "LinkedIn", "url": "not a url"},
        ],
    }))
    .unwrap_err();
    let msgs = err.messages("social_links").unwrap();
    assert!(msgs.iter().any(|m| m.contains("entry 2") && m.contains("icon")));
    assert!(msgs.iter().any(|m| m.contains("entry 2") && m.contains("url")));
}

#[test]
fn non_object_link_entry_is_rejected() {
    let err = validate_site_meta(&json!({"social_links": ["github"]})).unwrap_err();
    assert_eq!(
        err.messages("social_links").unwrap(),
        &["entry 1: must be an object".to_string()]
    );
}

#[test]
fn hero_fields_enforce_length_bounds() {
    let err = validate_site_meta(&json!({
        "hero_title": "x".repeat(201),
        "hero_subtitle": "y".repeat(501),
    }))
    .unwrap_err();
    assert!(err.messages("hero_title").is_some());
    assert!(err.messages("hero_subtitle").is_some());
}

// ── External representation ──────────────────────────────────────

#[test]
fn external_form_keeps_link_keys_verbatim() {
    let meta = validate_site_meta(&json!({
        "hero_title": "Hi",
        "social_links": [github_link()],
    }))
    .unwrap();
    let ext = meta.to_external();
    assert_eq!(ext["heroTitle"], "Hi");
    assert_eq!(ext["socialLinks"][0]["platform"], "GitHub");
    assert_eq!(ext["socialLinks"][0]["url"], "https://github.com/ada");
}

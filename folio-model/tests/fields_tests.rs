use folio_model::fields::{externalize_keys, internalize_keys, to_external, to_internal};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

// ── Vocabulary pairs ─────────────────────────────────────────────

#[test]
fn schema_vocabulary_maps_both_ways() {
    let pairs = [
        ("title", "title"),
        ("slug", "slug"),
        ("short_desc", "shortDesc"),
        ("long_md", "longMd"),
        ("github_url", "githubUrl"),
        ("demo_url", "demoUrl"),
        ("cover_image", "coverImage"),
        ("order_index", "orderIndex"),
        ("created_at", "createdAt"),
        ("start_date", "startDate"),
        ("end_date", "endDate"),
        ("is_current", "isCurrent"),
        ("hero_title", "heroTitle"),
        ("hero_subtitle", "heroSubtitle"),
        ("bio_md", "bioMd"),
        ("social_links", "socialLinks"),
        ("avatar_image", "avatarImage"),
        ("profile_image", "profileImage"),
    ];
    for (internal, external) in pairs {
        assert_eq!(to_external(internal), external);
        assert_eq!(to_internal(external), internal);
    }
}

// ── Key mapping on JSON objects ──────────────────────────────────

#[test]
fn internalize_then_externalize_is_identity() {
    let wire = json!({"orderIndex": 3, "shortDesc": "x", "tech": ["Rust"]});
    let round = externalize_keys(internalize_keys(wire.clone()));
    assert_eq!(round, wire);
}

#[test]
fn non_objects_pass_through() {
    assert_eq!(externalize_keys(json!([1, 2])), json!([1, 2]));
    assert_eq!(internalize_keys(json!("plain")), json!("plain"));
}

// ── Inverse property ─────────────────────────────────────────────

proptest! {
    /// to_internal(to_external(s)) == s over the identifier vocabulary
    /// used by the schemas: lowercase words joined by underscores, each
    /// word starting with a letter.
    #[test]
    fn transform_is_invertible(s in "[a-z]{1,10}(_[a-z][a-z0-9]{0,9}){0,3}") {
        prop_assert_eq!(to_internal(&to_external(&s)), s);
    }
}

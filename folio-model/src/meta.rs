//! Site metadata singleton and its embedded social links.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Violations;
use crate::fields;
use crate::schema::{as_object, from_writable, EntitySchema, FieldSpec, UnknownKeys};

/// A social-media link embedded in [`SiteMeta`]; not independently
/// addressable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub icon: String,
}

/// Singleton record carrying hero content, biography and social links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SiteMeta {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub hero_title: Option<String>,
    #[serde(default)]
    pub hero_subtitle: Option<String>,
    #[serde(default)]
    pub bio_md: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub avatar_image: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl SiteMeta {
    /// External (wire) representation with camelCase keys. Social-link
    /// keys are single words and pass through unchanged.
    #[must_use]
    pub fn to_external(&self) -> Value {
        let value = serde_json::to_value(self).expect("site meta serializes to JSON");
        fields::externalize_keys(value)
    }
}

/// Platforms whose URLs must contain a canonical domain substring.
/// Matching against the platform name is case-insensitive and exact.
const KNOWN_PLATFORMS: &[(&str, &[&str])] = &[
    ("github", &["github.com"]),
    ("linkedin", &["linkedin.com"]),
    ("twitter", &["twitter.com", "x.com"]),
];

/// Nested schema for a single [`SocialLink`].
#[must_use]
pub fn social_link_schema() -> EntitySchema {
    EntitySchema {
        entity_type: "social_link",
        fields: vec![
            FieldSpec::str("platform").required().min_len(1).max_len(50),
            FieldSpec::url("url").required(),
            FieldSpec::str("icon").required().min_len(1).max_len(50),
        ],
        unknown_keys: UnknownKeys::Ignore,
    }
}

/// Schema description for [`SiteMeta`].
#[must_use]
pub fn site_meta_schema() -> EntitySchema {
    EntitySchema {
        entity_type: "site_meta",
        fields: vec![
            FieldSpec::int("id").read_only(),
            FieldSpec::str("hero_title").max_len(200),
            FieldSpec::str("hero_subtitle").max_len(500),
            FieldSpec::str("bio_md"),
            FieldSpec::link_list("social_links"),
            FieldSpec::str("avatar_image").max_len(500),
            FieldSpec::str("profile_image").max_len(500),
        ],
        unknown_keys: UnknownKeys::Ignore,
    }
}

/// Validate a candidate site-meta record: generic field pass, nested
/// per-link validation, then the list-level platform rules.
pub fn validate_site_meta(data: &Value) -> Result<SiteMeta, Violations> {
    let obj = as_object(data)?;
    let schema = site_meta_schema();
    let mut v = schema.check(obj);

    if let Some(links) = obj.get("social_links").and_then(Value::as_array) {
        link_rules(links, &mut v);
    }

    v.into_result()?;
    from_writable(&schema, obj)
}

fn link_rules(links: &[Value], v: &mut Violations) {
    let link_schema = social_link_schema();
    let mut seen_platforms: Vec<String> = Vec::new();

    for (i, link) in links.iter().enumerate() {
        let n = i + 1;
        let Some(obj) = link.as_object() else {
            v.add("social_links", format!("entry {n}: must be an object"));
            continue;
        };

        let nested = link_schema.check(obj);
        for (field, msgs) in nested.iter() {
            for msg in msgs {
                v.add("social_links", format!("entry {n}: {field}: {msg}"));
            }
        }

        let platform = obj
            .get("platform")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase();
        let url = obj.get("url").and_then(Value::as_str).unwrap_or_default();

        if !platform.is_empty() {
            if seen_platforms.contains(&platform) {
                v.add_schema("Duplicate social media platform found");
            }
            seen_platforms.push(platform.clone());
        }

        if let Some((_, domains)) = KNOWN_PLATFORMS.iter().find(|(p, _)| *p == platform) {
            if !domains.iter().any(|d| url.contains(d)) {
                v.add_schema(format!(
                    "{} URL must contain {}",
                    display_platform(&platform),
                    domains.join(" or ")
                ));
            }
        }
    }
}

fn display_platform(platform: &str) -> &'static str {
    match platform {
        "github" => "GitHub",
        "linkedin" => "LinkedIn",
        _ => "Twitter",
    }
}

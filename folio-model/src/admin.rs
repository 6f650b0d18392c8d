//! Management-console transform layer.
//!
//! The console edits list-shaped fields as flat text: comma-separated
//! for `tech`, one-per-line for `bullets`, free-form JSON for social
//! links. This module converts those surfaces to the canonical
//! structured form, resolves slugs, and sanitizes upload filenames. It
//! always transforms first and then calls the validation engine — never
//! the other way around.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AdminError, Violations};
use crate::experience::validate_experience;
use crate::meta::{validate_site_meta, SiteMeta, SocialLink};
use crate::project::{validate_project, Project};
use crate::Experience;

static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("non-word pattern compiles"));

// Underscores are collapsed along with spaces so derived slugs always
// satisfy the slug pattern (`\w` matches `_`).
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_\s-]+").expect("separator pattern compiles"));

static UNSAFE_FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]+").expect("filename pattern compiles"));

/// Upload extensions accepted for image references (case-insensitive).
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// Base directory under which stored image references are built.
pub const IMAGE_BASE_DIR: &str = "content/images/projects";

// ── List-shaped edit fields ──────────────────────────────────────

/// Comma-separated text -> ordered list of trimmed, non-empty entries.
#[must_use]
pub fn split_comma_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read-back form of a comma list.
#[must_use]
pub fn join_comma_list(items: &[String]) -> String {
    items.join(", ")
}

/// Newline-separated text -> ordered list of trimmed, non-empty entries.
#[must_use]
pub fn split_line_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read-back form of a line list.
#[must_use]
pub fn join_line_list(items: &[String]) -> String {
    items.join("\n")
}

// ── Social links as JSON text ────────────────────────────────────

/// Parse the free-form JSON edit surface for social links. A parse
/// failure is the single violation reported; per-link structure is
/// checked later by the validation engine.
pub fn parse_social_links_text(text: &str) -> Result<Value, Violations> {
    serde_json::from_str(text).map_err(|_| {
        let mut v = Violations::new();
        v.add("social_links", "Social links must be valid JSON");
        v
    })
}

/// Render social links back to indented JSON for editing.
#[must_use]
pub fn render_social_links_text(links: &[SocialLink]) -> String {
    serde_json::to_string_pretty(links).unwrap_or_else(|_| "[]".to_string())
}

// ── Slug derivation & resolution ─────────────────────────────────

/// Derive a URL-friendly slug from a title: lowercase, strip non-word
/// characters, collapse whitespace/hyphen runs into single hyphens.
/// Idempotent on strings that are already valid slugs.
#[must_use]
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let stripped = NON_WORD_RE.replace_all(&lower, "");
    let hyphenated = SEPARATOR_RE.replace_all(&stripped, "-");
    hyphenated.trim_matches('-').to_string()
}

/// Resolve the slug for a write: use the supplied slug when present,
/// otherwise derive one from the title; then probe storage (via
/// `owner_of`) for a different record already using it. A collision is
/// a conflict naming the slug, never a silent rename.
///
/// `current_id` excludes the record being updated from the probe. The
/// storage layer's UNIQUE constraint remains the backstop; this check
/// is the early, user-friendly rejection.
pub fn resolve_slug<F>(
    supplied: Option<&str>,
    title: &str,
    current_id: Option<i64>,
    owner_of: F,
) -> Result<String, AdminError>
where
    F: Fn(&str) -> Option<i64>,
{
    let slug = match supplied.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => slugify(title),
    };

    if !slug.is_empty() {
        if let Some(owner) = owner_of(&slug) {
            if current_id != Some(owner) {
                return Err(AdminError::SlugConflict(slug));
            }
        }
    }
    Ok(slug)
}

// ── Upload filenames ─────────────────────────────────────────────

/// Strip path separators and unsafe characters from an uploaded
/// filename. The original name is never trusted verbatim.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned = UNSAFE_FILENAME_RE.replace_all(base, "_");
    let cleaned = cleaned.trim_start_matches(['.', '_']);
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Build the stored relative reference for an accepted upload, or
/// reject a filename whose extension is not an allowed image type.
pub fn stored_image_path(filename: &str) -> Result<String, AdminError> {
    let safe = sanitize_filename(filename);
    let ext = safe
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if !ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        let mut v = Violations::new();
        v.add(
            "file",
            format!(
                "Invalid file type. Allowed types: {}",
                ALLOWED_IMAGE_EXTENSIONS.join(", ")
            ),
        );
        return Err(AdminError::Validation(v));
    }
    Ok(format!("{IMAGE_BASE_DIR}/{safe}"))
}

// ── Console forms ────────────────────────────────────────────────

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn insert_str(map: &mut Map<String, Value>, key: &str, value: Option<String>) {
    if let Some(s) = blank_to_none(value) {
        map.insert(key.to_string(), Value::String(s));
    }
}

/// Flat-text console form for a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectForm {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub long_md: Option<String>,
    /// Comma-separated, e.g. "React, TypeScript, Node.js".
    #[serde(default)]
    pub tech: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order_index: i64,
}

impl ProjectForm {
    /// Transform to canonical shape, resolve the slug against storage,
    /// and run the validation engine.
    pub fn into_record<F>(
        self,
        current_id: Option<i64>,
        owner_of: F,
    ) -> Result<Project, AdminError>
    where
        F: Fn(&str) -> Option<i64>,
    {
        let slug = resolve_slug(self.slug.as_deref(), &self.title, current_id, owner_of)?;

        let mut map = Map::new();
        map.insert("title".to_string(), Value::String(self.title));
        map.insert("slug".to_string(), Value::String(slug));
        insert_str(&mut map, "short_desc", self.short_desc);
        insert_str(&mut map, "long_md", self.long_md);
        map.insert(
            "tech".to_string(),
            serde_json::to_value(split_comma_list(self.tech.as_deref().unwrap_or_default()))
                .expect("string list serializes"),
        );
        insert_str(&mut map, "github_url", self.github_url);
        insert_str(&mut map, "demo_url", self.demo_url);
        map.insert("featured".to_string(), Value::Bool(self.featured));
        map.insert("order_index".to_string(), Value::from(self.order_index));

        validate_project(&Value::Object(map)).map_err(AdminError::Validation)
    }

    /// Read-back: flatten a stored project into its editable form.
    #[must_use]
    pub fn from_record(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            slug: Some(project.slug.clone()),
            short_desc: project.short_desc.clone(),
            long_md: project.long_md.clone(),
            tech: Some(join_comma_list(&project.tech)),
            github_url: project.github_url.clone(),
            demo_url: project.demo_url.clone(),
            featured: project.featured,
            order_index: project.order_index,
        }
    }
}

/// Flat-text console form for an experience entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceForm {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub location: Option<String>,
    /// `YYYY-MM-DD`.
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    /// One bullet point per line.
    #[serde(default)]
    pub bullets: Option<String>,
    /// Comma-separated.
    #[serde(default)]
    pub tech: Option<String>,
    #[serde(default)]
    pub order_index: i64,
}

impl ExperienceForm {
    /// Transform to canonical shape and run the validation engine.
    pub fn into_record(self) -> Result<Experience, AdminError> {
        let mut map = Map::new();
        map.insert("company".to_string(), Value::String(self.company));
        map.insert("role".to_string(), Value::String(self.role));
        insert_str(&mut map, "location", self.location);
        map.insert("start_date".to_string(), Value::String(self.start_date));
        insert_str(&mut map, "end_date", self.end_date);
        map.insert(
            "bullets".to_string(),
            serde_json::to_value(split_line_list(self.bullets.as_deref().unwrap_or_default()))
                .expect("string list serializes"),
        );
        map.insert(
            "tech".to_string(),
            serde_json::to_value(split_comma_list(self.tech.as_deref().unwrap_or_default()))
                .expect("string list serializes"),
        );
        map.insert("order_index".to_string(), Value::from(self.order_index));

        validate_experience(&Value::Object(map)).map_err(AdminError::Validation)
    }

    /// Read-back: flatten a stored entry into its editable form.
    #[must_use]
    pub fn from_record(exp: &Experience) -> Self {
        Self {
            company: exp.company.clone(),
            role: exp.role.clone(),
            location: exp.location.clone(),
            start_date: exp.start_date.to_string(),
            end_date: exp.end_date.map(|d| d.to_string()),
            bullets: Some(join_line_list(&exp.bullets)),
            tech: Some(join_comma_list(&exp.tech)),
            order_index: exp.order_index,
        }
    }
}

/// Flat-text console form for the site-meta singleton.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteMetaForm {
    #[serde(default)]
    pub hero_title: Option<String>,
    #[serde(default)]
    pub hero_subtitle: Option<String>,
    #[serde(default)]
    pub bio_md: Option<String>,
    /// Free-form JSON list of `{platform, url, icon}` objects.
    #[serde(default)]
    pub social_links: Option<String>,
}

impl SiteMetaForm {
    /// Transform to canonical shape and run the validation engine.
    /// Image references are managed by the upload path, so they carry
    /// over from `current` untouched.
    pub fn into_record(self, current: Option<&SiteMeta>) -> Result<SiteMeta, AdminError> {
        let links = match blank_to_none(self.social_links) {
            Some(text) => parse_social_links_text(&text).map_err(AdminError::Validation)?,
            None => Value::Array(Vec::new()),
        };

        let mut map = Map::new();
        insert_str(&mut map, "hero_title", self.hero_title);
        insert_str(&mut map, "hero_subtitle", self.hero_subtitle);
        insert_str(&mut map, "bio_md", self.bio_md);
        map.insert("social_links".to_string(), links);
        if let Some(current) = current {
            insert_str(&mut map, "avatar_image", current.avatar_image.clone());
            insert_str(&mut map, "profile_image", current.profile_image.clone());
        }

        let mut meta =
            validate_site_meta(&Value::Object(map)).map_err(AdminError::Validation)?;
        meta.id = current.and_then(|m| m.id);
        Ok(meta)
    }

    /// Read-back: social links re-serialized as indented JSON text.
    #[must_use]
    pub fn from_record(meta: &SiteMeta) -> Self {
        Self {
            hero_title: meta.hero_title.clone(),
            hero_subtitle: meta.hero_subtitle.clone(),
            bio_md: meta.bio_md.clone(),
            social_links: Some(render_social_links_text(&meta.social_links)),
        }
    }
}

//! Content store CRUD operations.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tracing::debug;

use folio_model::{ContactMessage, Experience, Project, SiteMeta, SocialLink};

use crate::error::{StorageError, StorageResult};

const MIGRATIONS: &str = "
CREATE TABLE IF NOT EXISTS projects (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    slug        TEXT NOT NULL UNIQUE,
    short_desc  TEXT,
    long_md     TEXT,
    tech        TEXT NOT NULL DEFAULT '[]',
    github_url  TEXT,
    demo_url    TEXT,
    cover_image TEXT,
    featured    INTEGER NOT NULL DEFAULT 0,
    order_index INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS experience (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    company     TEXT NOT NULL,
    role        TEXT NOT NULL,
    location    TEXT,
    start_date  TEXT NOT NULL,
    end_date    TEXT,
    bullets     TEXT NOT NULL DEFAULT '[]',
    tech        TEXT NOT NULL DEFAULT '[]',
    order_index INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS contact_messages (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    email      TEXT NOT NULL,
    message    TEXT NOT NULL,
    created_at TEXT NOT NULL,
    replied    INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS site_meta (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    hero_title    TEXT,
    hero_subtitle TEXT,
    bio_md        TEXT,
    social_links  TEXT NOT NULL DEFAULT '[]',
    avatar_image  TEXT,
    profile_image TEXT
);
";

/// SQLite-backed store for all Folio content.
pub struct ContentStore {
    conn: Connection,
}

impl ContentStore {
    /// Open (or create) the content database at `path` and run
    /// migrations.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::from_connection(conn)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch(MIGRATIONS)
            .map_err(|e| StorageError::Migration(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Cheap connectivity probe for health checks.
    pub fn ping(&self) -> StorageResult<()> {
        self.conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    // ── Projects ─────────────────────────────────────────────────

    /// Insert a project, assigning id and (unless seeded) creation
    /// timestamp. Returns the stored record.
    pub fn insert_project(&self, project: &Project) -> StorageResult<Project> {
        let created_at = project
            .created_at
            .unwrap_or_else(|| Utc::now().naive_utc());
        self.conn.execute(
            "INSERT INTO projects (title, slug, short_desc, long_md, tech, github_url,
                                   demo_url, cover_image, featured, order_index, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                project.title,
                project.slug,
                project.short_desc,
                project.long_md,
                serde_json::to_string(&project.tech)?,
                project.github_url,
                project.demo_url,
                project.cover_image,
                project.featured,
                project.order_index,
                created_at,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, slug = %project.slug, "inserted project");
        self.project_by_id(id)?
            .ok_or_else(|| StorageError::NotFound(format!("project {id}")))
    }

    /// Update a project in place. `created_at` is immutable and kept
    /// from the stored row.
    pub fn update_project(&self, id: i64, project: &Project) -> StorageResult<Project> {
        let changed = self.conn.execute(
            "UPDATE projects
             SET title = ?1, slug = ?2, short_desc = ?3, long_md = ?4, tech = ?5,
                 github_url = ?6, demo_url = ?7, cover_image = ?8, featured = ?9,
                 order_index = ?10
             WHERE id = ?11",
            params![
                project.title,
                project.slug,
                project.short_desc,
                project.long_md,
                serde_json::to_string(&project.tech)?,
                project.github_url,
                project.demo_url,
                project.cover_image,
                project.featured,
                project.order_index,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound(format!("project {id}")));
        }
        self.project_by_id(id)?
            .ok_or_else(|| StorageError::NotFound(format!("project {id}")))
    }

    /// Point an image reference at a freshly stored upload.
    pub fn set_project_cover(&self, id: i64, reference: &str) -> StorageResult<()> {
        let changed = self.conn.execute(
            "UPDATE projects SET cover_image = ?1 WHERE id = ?2",
            params![reference, id],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound(format!("project {id}")));
        }
        Ok(())
    }

    pub fn project_by_id(&self, id: i64) -> StorageResult<Option<Project>> {
        self.optional_row(
            "SELECT * FROM projects WHERE id = ?1",
            params![id],
            project_from_row,
        )
    }

    pub fn project_by_slug(&self, slug: &str) -> StorageResult<Option<Project>> {
        self.optional_row(
            "SELECT * FROM projects WHERE slug = ?1",
            params![slug],
            project_from_row,
        )
    }

    /// Id of the project owning `slug`, if any. Used for the early,
    /// user-friendly uniqueness rejection.
    pub fn slug_owner(&self, slug: &str) -> StorageResult<Option<i64>> {
        self.optional_row(
            "SELECT id FROM projects WHERE slug = ?1",
            params![slug],
            |row| row.get(0),
        )
    }

    /// List projects, optionally filtered by the featured flag, ordered
    /// by order index ascending with creation time descending as the
    /// tie-break.
    pub fn list_projects(&self, featured: Option<bool>) -> StorageResult<Vec<Project>> {
        match featured {
            Some(flag) => self.all_rows(
                "SELECT * FROM projects WHERE featured = ?1
                 ORDER BY order_index ASC, created_at DESC",
                params![flag],
                project_from_row,
            ),
            None => self.all_rows(
                "SELECT * FROM projects ORDER BY order_index ASC, created_at DESC",
                params![],
                project_from_row,
            ),
        }
    }

    pub fn count_projects(&self) -> StorageResult<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))?)
    }

    // ── Experience ───────────────────────────────────────────────

    pub fn insert_experience(&self, exp: &Experience) -> StorageResult<Experience> {
        self.conn.execute(
            "INSERT INTO experience (company, role, location, start_date, end_date,
                                     bullets, tech, order_index)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                exp.company,
                exp.role,
                exp.location,
                exp.start_date,
                exp.end_date,
                serde_json::to_string(&exp.bullets)?,
                serde_json::to_string(&exp.tech)?,
                exp.order_index,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, company = %exp.company, "inserted experience entry");
        self.experience_by_id(id)?
            .ok_or_else(|| StorageError::NotFound(format!("experience {id}")))
    }

    pub fn update_experience(&self, id: i64, exp: &Experience) -> StorageResult<Experience> {
        let changed = self.conn.execute(
            "UPDATE experience
             SET company = ?1, role = ?2, location = ?3, start_date = ?4,
                 end_date = ?5, bullets = ?6, tech = ?7, order_index = ?8
             WHERE id = ?9",
            params![
                exp.company,
                exp.role,
                exp.location,
                exp.start_date,
                exp.end_date,
                serde_json::to_string(&exp.bullets)?,
                serde_json::to_string(&exp.tech)?,
                exp.order_index,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound(format!("experience {id}")));
        }
        self.experience_by_id(id)?
            .ok_or_else(|| StorageError::NotFound(format!("experience {id}")))
    }

    pub fn experience_by_id(&self, id: i64) -> StorageResult<Option<Experience>> {
        self.optional_row(
            "SELECT * FROM experience WHERE id = ?1",
            params![id],
            experience_from_row,
        )
    }

    /// List experience entries most recent first.
    pub fn list_experience(&self) -> StorageResult<Vec<Experience>> {
        self.all_rows(
            "SELECT * FROM experience ORDER BY start_date DESC",
            params![],
            experience_from_row,
        )
    }

    // ── Contact messages ─────────────────────────────────────────

    /// Persist an inbound submission, assigning id and arrival
    /// timestamp.
    pub fn insert_contact_message(
        &self,
        message: &ContactMessage,
    ) -> StorageResult<ContactMessage> {
        let created_at = message
            .created_at
            .unwrap_or_else(|| Utc::now().naive_utc());
        self.conn.execute(
            "INSERT INTO contact_messages (name, email, message, created_at, replied)
             VALUES (?1, ?2, ?3, ?4, 0)",
            params![message.name, message.email, message.message, created_at],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "stored contact message");
        self.contact_message_by_id(id)?
            .ok_or_else(|| StorageError::NotFound(format!("contact message {id}")))
    }

    pub fn contact_message_by_id(&self, id: i64) -> StorageResult<Option<ContactMessage>> {
        self.optional_row(
            "SELECT * FROM contact_messages WHERE id = ?1",
            params![id],
            contact_from_row,
        )
    }

    /// List messages newest first.
    pub fn list_contact_messages(&self) -> StorageResult<Vec<ContactMessage>> {
        self.all_rows(
            "SELECT * FROM contact_messages ORDER BY created_at DESC",
            params![],
            contact_from_row,
        )
    }

    /// Flip the administrator's replied flag.
    pub fn set_replied(&self, id: i64, replied: bool) -> StorageResult<ContactMessage> {
        let changed = self.conn.execute(
            "UPDATE contact_messages SET replied = ?1 WHERE id = ?2",
            params![replied, id],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound(format!("contact message {id}")));
        }
        self.contact_message_by_id(id)?
            .ok_or_else(|| StorageError::NotFound(format!("contact message {id}")))
    }

    pub fn count_contact_messages(&self) -> StorageResult<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM contact_messages",
            [],
            |row| row.get(0),
        )?)
    }

    // ── Site meta ────────────────────────────────────────────────

    /// Resolve the singleton: the record with the lowest id. The read
    /// path always lands on the same record even if duplicates exist.
    pub fn current_meta(&self) -> StorageResult<Option<SiteMeta>> {
        self.optional_row(
            "SELECT * FROM site_meta ORDER BY id ASC LIMIT 1",
            params![],
            meta_from_row,
        )
    }

    /// Write the singleton: update the current record in place, or
    /// insert the first one.
    pub fn upsert_meta(&self, meta: &SiteMeta) -> StorageResult<SiteMeta> {
        let links = serde_json::to_string(&meta.social_links)?;
        match self.current_meta()? {
            Some(current) => {
                let id = current.id.unwrap_or_default();
                self.conn.execute(
                    "UPDATE site_meta
                     SET hero_title = ?1, hero_subtitle = ?2, bio_md = ?3,
                         social_links = ?4, avatar_image = ?5, profile_image = ?6
                     WHERE id = ?7",
                    params![
                        meta.hero_title,
                        meta.hero_subtitle,
                        meta.bio_md,
                        links,
                        meta.avatar_image,
                        meta.profile_image,
                        id,
                    ],
                )?;
            }
            None => {
                self.conn.execute(
                    "INSERT INTO site_meta (hero_title, hero_subtitle, bio_md,
                                            social_links, avatar_image, profile_image)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        meta.hero_title,
                        meta.hero_subtitle,
                        meta.bio_md,
                        links,
                        meta.avatar_image,
                        meta.profile_image,
                    ],
                )?;
            }
        }
        self.current_meta()?
            .ok_or_else(|| StorageError::NotFound("site meta".to_string()))
    }

    /// Update one of the singleton's image references, creating the
    /// record if the site has no metadata yet.
    pub fn set_meta_image(&self, field: MetaImage, reference: &str) -> StorageResult<SiteMeta> {
        let mut meta = self.current_meta()?.unwrap_or_default();
        match field {
            MetaImage::Avatar => meta.avatar_image = Some(reference.to_string()),
            MetaImage::Profile => meta.profile_image = Some(reference.to_string()),
        }
        self.upsert_meta(&meta)
    }

    // ── Row plumbing ─────────────────────────────────────────────

    fn optional_row<T, P, F>(&self, sql: &str, params: P, map: F) -> StorageResult<Option<T>>
    where
        P: rusqlite::Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        use rusqlite::OptionalExtension;
        Ok(self.conn.query_row(sql, params, map).optional()?)
    }

    fn all_rows<T, P, F>(&self, sql: &str, params: P, map: F) -> StorageResult<Vec<T>>
    where
        P: rusqlite::Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map)?;
        Ok(rows.collect::<rusqlite::Result<Vec<T>>>()?)
    }
}

/// Which site-meta image reference an upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaImage {
    Avatar,
    Profile,
}

fn json_list<T: serde::de::DeserializeOwned>(
    row: &Row<'_>,
    column: &str,
) -> rusqlite::Result<T> {
    let text: String = row.get(column)?;
    serde_json::from_str(&text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        slug: row.get("slug")?,
        short_desc: row.get("short_desc")?,
        long_md: row.get("long_md")?,
        tech: json_list(row, "tech")?,
        github_url: row.get("github_url")?,
        demo_url: row.get("demo_url")?,
        cover_image: row.get("cover_image")?,
        featured: row.get("featured")?,
        order_index: row.get("order_index")?,
        created_at: Some(row.get("created_at")?),
    })
}

fn experience_from_row(row: &Row<'_>) -> rusqlite::Result<Experience> {
    Ok(Experience {
        id: Some(row.get("id")?),
        company: row.get("company")?,
        role: row.get("role")?,
        location: row.get("location")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        bullets: json_list(row, "bullets")?,
        tech: json_list(row, "tech")?,
        order_index: row.get("order_index")?,
    })
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<ContactMessage> {
    Ok(ContactMessage {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        email: row.get("email")?,
        message: row.get("message")?,
        created_at: Some(row.get("created_at")?),
        replied: row.get("replied")?,
    })
}

fn meta_from_row(row: &Row<'_>) -> rusqlite::Result<SiteMeta> {
    let links: Vec<SocialLink> = json_list(row, "social_links")?;
    Ok(SiteMeta {
        id: Some(row.get("id")?),
        hero_title: row.get("hero_title")?,
        hero_subtitle: row.get("hero_subtitle")?,
        bio_md: row.get("bio_md")?,
        social_links: links,
        avatar_image: row.get("avatar_image")?,
        profile_image: row.get("profile_image")?,
    })
}

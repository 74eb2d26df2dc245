use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use tracing::debug;

use shared::domain::{Note, NoteId, NoteKind};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct StoredNote {
    pub note_id: NoteId,
    pub title: String,
    pub content: String,
    pub kind: NoteKind,
    pub created_at: DateTime<Utc>,
}

impl StoredNote {
    pub fn as_note(&self) -> Note {
        Note {
            title: self.title.clone(),
            content: self.content.clone(),
            kind: self.kind,
        }
    }
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let mut pool_options = SqlitePoolOptions::new().max_connections(5);
        if is_memory_url(database_url) {
            // Each in-memory connection is its own empty database.
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }
        let pool = pool_options
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open note database '{database_url}'"))?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run note database migrations")?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn insert_note(&self, note: &Note) -> Result<NoteId> {
        let result = sqlx::query("INSERT INTO notes (title, content, kind) VALUES (?, ?, ?)")
            .bind(&note.title)
            .bind(&note.content)
            .bind(note.kind.as_str())
            .execute(&self.pool)
            .await
            .context("failed to insert note")?;
        let note_id = NoteId(result.last_insert_rowid());
        debug!(note_id = note_id.0, kind = %note.kind, "stored note");
        Ok(note_id)
    }

    pub async fn list_notes(&self) -> Result<Vec<StoredNote>> {
        let rows = sqlx::query(
            "SELECT note_id, title, content, kind, created_at FROM notes ORDER BY note_id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list notes")?;

        rows.into_iter()
            .map(|row| -> Result<StoredNote> {
                let kind: String = row.try_get("kind")?;
                Ok(StoredNote {
                    note_id: NoteId(row.try_get("note_id")?),
                    title: row.try_get("title")?,
                    content: row.try_get("content")?,
                    kind: kind.parse()?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }

    pub async fn count_notes(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notes")
            .fetch_one(&self.pool)
            .await
            .context("failed to count notes")
    }
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if is_memory_url(database_url) || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

//! Postgres storage

use std::time::Duration;

use chrono::NaiveDateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::notes::Note;
use crate::notes::NoteFilter;

use super::CreateNoteValues;
use super::Error;
use super::Pagination;
use super::Result;
use super::Storage;
use super::UpdateNoteValues;

/// Migrator to run migrations on startup
static MIGRATOR: Migrator = sqlx::migrate!();

/// Postgres storage
#[derive(Clone)]
pub struct Postgres {
    /// Pool of connections
    connection_pool: PgPool,
}

impl Postgres {
    /// Create Postgres storage
    ///
    /// Migrations will be run
    pub async fn connect(database_connection_string: &str) -> Result<Self> {
        let connection_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_connection_string)
            .await
            .map_err(storage_error)?;

        Self::new_with_pool(connection_pool).await
    }

    /// Create Postgres storage with existing pool
    ///
    /// Migrations will be run
    pub async fn new_with_pool(connection_pool: PgPool) -> Result<Self> {
        MIGRATOR
            .run(&connection_pool)
            .await
            .map_err(|err| Error::Migration(err.to_string()))?;

        Ok(Self { connection_pool })
    }
}

/// `SQLx` version of note
#[derive(sqlx::FromRow)]
struct SqlxNote {
    /// Note ID
    id: Uuid,

    /// Title
    title: String,

    /// Content
    content: String,

    /// Tags
    tags: Vec<String>,

    /// Pinned or not
    is_pinned: bool,

    /// Creation date
    created_at: NaiveDateTime,

    /// Last updated at
    updated_at: NaiveDateTime,
}

impl Note {
    /// Create note from `SQLx` version
    fn from_sqlx_note(note: SqlxNote) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            tags: note.tags,
            is_pinned: note.is_pinned,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }

    /// Maybe create note from `SQLx` version
    fn from_sqlx_note_optional(note: Option<SqlxNote>) -> Option<Self> {
        note.map(Self::from_sqlx_note)
    }

    /// Create multiple notes from `SQLx` version
    fn from_sqlx_note_multiple(notes: Vec<SqlxNote>) -> Vec<Self> {
        notes.into_iter().map(Self::from_sqlx_note).collect()
    }
}

impl Storage for Postgres {
    async fn find_notes(&self, filter: &NoteFilter, pagination: &Pagination) -> Result<Vec<Note>> {
        // the search term is already folded, `$1` being NULL means no filter
        sqlx::query_as::<_, SqlxNote>(
            r"
            SELECT
                id,
                title,
                content,
                tags,
                is_pinned,
                created_at,
                updated_at
            FROM notes
            WHERE $1::TEXT IS NULL
                OR strpos(fold_search_text(title), $1) > 0
                OR strpos(fold_search_text(content), $1) > 0
                OR EXISTS (
                    SELECT 1
                    FROM unnest(tags) AS tag
                    WHERE strpos(fold_search_text(tag), $1) > 0
                )
            ORDER BY is_pinned DESC, created_at DESC
            OFFSET $2
            LIMIT $3
            ",
        )
        .bind(filter.search_term())
        .bind(to_bigint(pagination.skip))
        .bind(to_bigint(pagination.limit))
        .fetch_all(&self.connection_pool)
        .await
        .map(Note::from_sqlx_note_multiple)
        .map_err(storage_error)
    }

    async fn count_notes(&self, filter: &NoteFilter) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM notes
            WHERE $1::TEXT IS NULL
                OR strpos(fold_search_text(title), $1) > 0
                OR strpos(fold_search_text(content), $1) > 0
                OR EXISTS (
                    SELECT 1
                    FROM unnest(tags) AS tag
                    WHERE strpos(fold_search_text(tag), $1) > 0
                )
            ",
        )
        .bind(filter.search_term())
        .fetch_one(&self.connection_pool)
        .await
        .map_err(storage_error)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn create_note(&self, values: &CreateNoteValues<'_>) -> Result<Note> {
        let now = Utc::now().naive_utc();

        sqlx::query_as::<_, SqlxNote>(
            r"
            INSERT INTO notes (
                id,
                title,
                content,
                tags,
                is_pinned,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, FALSE, $5, $5)
            RETURNING
                id,
                title,
                content,
                tags,
                is_pinned,
                created_at,
                updated_at
            ",
        )
        .bind(Uuid::new_v4())
        .bind(values.title)
        .bind(values.content)
        .bind(values.tags.to_vec())
        .bind(now)
        .fetch_one(&self.connection_pool)
        .await
        .map(Note::from_sqlx_note)
        .map_err(storage_error)
    }

    async fn update_note(&self, id: &Uuid, values: &UpdateNoteValues<'_>) -> Result<Option<Note>> {
        sqlx::query_as::<_, SqlxNote>(
            r"
            UPDATE notes
            SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                tags = COALESCE($4, tags),
                is_pinned = COALESCE($5, is_pinned),
                updated_at = $6
            WHERE id = $1
            RETURNING
                id,
                title,
                content,
                tags,
                is_pinned,
                created_at,
                updated_at
            ",
        )
        .bind(id)
        .bind(values.title)
        .bind(values.content)
        .bind(values.tags.map(<[String]>::to_vec))
        .bind(values.is_pinned)
        .bind(Utc::now().naive_utc())
        .fetch_optional(&self.connection_pool)
        .await
        .map(Note::from_sqlx_note_optional)
        .map_err(storage_error)
    }

    async fn delete_note(&self, id: &Uuid) -> Result<Option<Note>> {
        sqlx::query_as::<_, SqlxNote>(
            r"
            DELETE FROM notes
            WHERE id = $1
            RETURNING
                id,
                title,
                content,
                tags,
                is_pinned,
                created_at,
                updated_at
            ",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
        .map(Note::from_sqlx_note_optional)
        .map_err(storage_error)
    }
}

/// Postgres has no unsigned integers
fn to_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Split `SQLx` errors in connection problems and everything else
fn storage_error(err: sqlx::Error) -> Error {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => Error::Connection(err.to_string()),
        err => Error::Query(err.to_string()),
    }
}

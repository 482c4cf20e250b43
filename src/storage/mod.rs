//! All things related to the storage of notes

use core::fmt;
use std::future::Future;

use sqlx::PgPool;
use uuid::Uuid;

pub use Config as StorageConfig;
pub use form_types::*;
pub use memory::Memory;
pub use postgres::Postgres;

use crate::notes::Note;
use crate::notes::NoteFilter;
use crate::utils::env_var;

mod form_types;
mod memory;
mod postgres;

/// Storage errors
#[derive(Debug)]
pub enum Error {
    /// A connection error with the storage
    Connection(String),

    /// The storage could not run a query
    Query(String),

    /// The storage schema could not be brought up to date
    Migration(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Connection(error) => write!(f, "Connection error: {error}"),
            Error::Query(error) => write!(f, "Query error: {error}"),
            Error::Migration(error) => write!(f, "Migration error: {error}"),
        }
    }
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Storage configuration
#[derive(Debug)]
pub enum Config {
    /// Postgres with the given connection string
    Postgres(String),

    /// Postgres with an existing connection pool
    #[cfg_attr(not(all(test, feature = "postgres-tests")), allow(dead_code))]
    ExistingConnection(PgPool),

    /// Keep everything in memory, gone on shutdown
    Memory,
}

impl Config {
    /// Detect configuration from environment
    ///
    /// Uses `DATABASE_URL` when set, falls back to memory otherwise
    pub fn from_env() -> Self {
        if let Some(database_url) = env_var("DATABASE_URL") {
            Self::Postgres(database_url)
        } else {
            tracing::warn!("`DATABASE_URL` is not set, notes are kept in memory");

            Self::Memory
        }
    }
}

/// Storage with all supported operations
///
/// Every single operation is atomic on its own, nothing spans multiple calls
pub trait Storage: Clone + Send + Sync + 'static {
    /// Find a page of notes matching the filter
    ///
    /// Pinned notes first, then newest first
    fn find_notes(
        &self,
        filter: &NoteFilter,
        pagination: &Pagination,
    ) -> impl Future<Output = Result<Vec<Note>>> + Send;

    /// Count all notes matching the filter
    fn count_notes(&self, filter: &NoteFilter) -> impl Future<Output = Result<u64>> + Send;

    /// Create a note
    fn create_note(&self, values: &CreateNoteValues) -> impl Future<Output = Result<Note>> + Send;

    /// Update a note, only the given values are changed
    ///
    /// `None` when there is no note with this ID
    fn update_note(
        &self,
        id: &Uuid,
        values: &UpdateNoteValues,
    ) -> impl Future<Output = Result<Option<Note>>> + Send;

    /// Delete a note for good
    ///
    /// `None` when there is no note with this ID
    fn delete_note(&self, id: &Uuid) -> impl Future<Output = Result<Option<Note>>> + Send;
}

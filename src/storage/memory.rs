//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::notes::Note;
use crate::notes::NoteFilter;

use super::CreateNoteValues;
use super::Pagination;
use super::Result;
use super::Storage;
use super::UpdateNoteValues;

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// All notes in storage, in order of creation
    notes: Arc<Mutex<Vec<Note>>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for Memory {
    async fn find_notes(&self, filter: &NoteFilter, pagination: &Pagination) -> Result<Vec<Note>> {
        let mut notes = self
            .notes
            .lock()
            .await
            .iter()
            .rev()
            .filter(|note| filter.matches(note))
            .cloned()
            .collect::<Vec<Note>>();

        // stable sort, equal timestamps keep the most recently created first
        notes.sort_by_key(|note| (Reverse(note.is_pinned), Reverse(note.created_at)));

        Ok(notes
            .into_iter()
            .skip(usize::try_from(pagination.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(pagination.limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn count_notes(&self, filter: &NoteFilter) -> Result<u64> {
        let count = self
            .notes
            .lock()
            .await
            .iter()
            .filter(|note| filter.matches(note))
            .count();

        Ok(count as u64)
    }

    async fn create_note(&self, values: &CreateNoteValues<'_>) -> Result<Note> {
        let now = Utc::now().naive_utc();

        let note = Note {
            id: Uuid::new_v4(),
            title: values.title.to_string(),
            content: values.content.to_string(),
            tags: values.tags.to_vec(),
            is_pinned: false,
            created_at: now,
            updated_at: now,
        };

        self.notes.lock().await.push(note.clone());

        Ok(note)
    }

    async fn update_note(&self, id: &Uuid, values: &UpdateNoteValues<'_>) -> Result<Option<Note>> {
        Ok(self
            .notes
            .lock()
            .await
            .iter_mut()
            .find(|note| &note.id == id)
            .map(|note| {
                if let Some(title) = values.title {
                    note.title = title.to_string();
                }

                if let Some(content) = values.content {
                    note.content = content.to_string();
                }

                if let Some(tags) = values.tags {
                    note.tags = tags.to_vec();
                }

                if let Some(is_pinned) = values.is_pinned {
                    note.is_pinned = is_pinned;
                }

                note.updated_at = Utc::now().naive_utc();

                note.clone()
            }))
    }

    async fn delete_note(&self, id: &Uuid) -> Result<Option<Note>> {
        let mut notes = self.notes.lock().await;

        Ok(notes
            .iter()
            .position(|note| &note.id == id)
            .map(|index| notes.remove(index)))
    }
}

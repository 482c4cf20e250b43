//! Notes API endpoints
//!
//! Listing, searching and managing notes

use axum::Extension;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::notes::Note;
use crate::notes::NoteFilter;
use crate::storage::CreateNoteValues;
use crate::storage::Pagination;
use crate::storage::Storage;
use crate::storage::UpdateNoteValues;

use super::Error;
use super::Form;
use super::PathParameters;
use super::QueryParameters;
use super::Success;
use super::optional_text;
use super::required_text;

/// Page shown when none is asked for
const DEFAULT_PAGE: u64 = 1;

/// Number of notes on a page when no limit is asked for
const DEFAULT_LIMIT: u64 = 6;

/// Note response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    /// Note ID
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Content
    pub content: String,

    /// Tags, in the order they were given
    pub tags: Vec<String>,

    /// Pinned notes are listed first
    pub is_pinned: bool,

    /// Creation date
    pub created_at: NaiveDateTime,

    /// Last updated at
    pub updated_at: NaiveDateTime,
}

impl NoteResponse {
    /// Create a response from a [`Note`](Note)
    fn from_note(note: Note) -> Self {
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

    /// Create a response from multiple [`Note`](Note)s
    fn from_note_multiple(notes: Vec<Note>) -> Vec<Self> {
        notes.into_iter().map(Self::from_note).collect()
    }
}

/// A single page of a listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListResponse {
    /// Notes on this page
    pub notes: Vec<NoteResponse>,

    /// Number of notes matching the query, on all pages
    pub total_notes: u64,

    /// Number of pages for the query
    pub total_pages: u64,

    /// The page being shown
    pub current_page: u64,
}

#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    page: Option<u64>,
    limit: Option<u64>,
    query: Option<String>,
}

/// List notes, optionally searching
///
/// Request:
/// ```sh
/// curl -v 'http://localhost:3001/api/get?page=1&limit=6&query=groceries'
/// ```
///
/// Response:
/// ```json
/// {
///   "notes": [ { "id": "<uuid>", "title": "Groceries" ... } ],
///   "totalNotes": 1,
///   "totalPages": 1,
///   "currentPage": 1
/// }
/// ```
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
    QueryParameters(query): QueryParameters<ListNotesQuery>,
) -> Result<Success<NoteListResponse>, Error> {
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    if page == 0 {
        return Err(Error::bad_request("Page must be a positive number"));
    }

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 {
        return Err(Error::bad_request("Limit must be a positive number"));
    }

    let filter = NoteFilter::from_query(query.query.as_deref().unwrap_or_default());
    let pagination = Pagination::from_page(page, limit);

    tracing::debug!("Listing notes: {filter:?}, {pagination:?}");

    let notes = storage
        .find_notes(&filter, &pagination)
        .await
        .map_err(Error::storage("Notes not fetched"))?;

    let total_notes = storage
        .count_notes(&filter)
        .await
        .map_err(Error::storage("Notes not fetched"))?;

    Ok(Success::ok(NoteListResponse {
        notes: NoteResponse::from_note_multiple(notes),
        total_notes,
        total_pages: pagination.total_pages(total_notes),
        current_page: page,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteForm {
    title: Option<String>,
    content: Option<String>,
    tags: Option<Vec<String>>,
}

/// Add a note
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "title": "Groceries", "content": "Milk", "tags": ["errands"] }' \
///     http://localhost:3001/api/add
/// ```
///
/// Response:
/// ```json
/// { "success": true, "msg": "Note added" }
/// ```
pub async fn create<S: Storage>(
    Extension(storage): Extension<S>,
    Form(form): Form<CreateNoteForm>,
) -> Result<Success<()>, Error> {
    let title = required_text(form.title.as_deref())
        .ok_or_else(|| Error::bad_request("Title is required"))?;

    let content = required_text(form.content.as_deref())
        .ok_or_else(|| Error::bad_request("Content is required"))?;

    let values = CreateNoteValues {
        title,
        content,
        tags: form.tags.as_deref().unwrap_or_default(),
    };

    let note = storage
        .create_note(&values)
        .await
        .map_err(Error::storage("Something went wrong while adding note"))?;

    tracing::debug!("Added note: {}", note.id);

    Ok(Success::message("Note added"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteForm {
    title: Option<String>,
    content: Option<String>,
    tags: Option<Vec<String>>,
    is_pinned: Option<bool>,
}

/// Edit a note, anything not given stays as it is
///
/// Request:
/// ```sh
/// curl -v -X PATCH -H 'Content-Type: application/json' \
///     -d '{ "content": "Milk and eggs" }' \
///     http://localhost:3001/api/edit/<uuid>
/// ```
///
/// Response:
/// ```json
/// { "success": true, "msg": "Note updated" }
/// ```
pub async fn update<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(note_id): PathParameters<Uuid>,
    Form(form): Form<UpdateNoteForm>,
) -> Result<Success<()>, Error> {
    // a pin state alone is not an edit, that is what `update_pin` is for
    if form.title.is_none() && form.content.is_none() && form.tags.is_none() {
        return Err(Error::bad_request("No changes made"));
    }

    let values = UpdateNoteValues {
        title: optional_text(form.title.as_deref(), "Title can not be empty")?,
        content: optional_text(form.content.as_deref(), "Content can not be empty")?,
        tags: form.tags.as_deref(),
        is_pinned: form.is_pinned,
    };

    storage
        .update_note(&note_id, &values)
        .await
        .map_err(Error::storage("Note update error"))?
        .ok_or_else(|| Error::not_found("Note not found"))?;

    tracing::debug!("Updated note: {note_id}");

    Ok(Success::message("Note updated"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePinForm {
    is_pinned: Option<bool>,
}

/// Pin or unpin a note
///
/// Request:
/// ```sh
/// curl -v -X PATCH -H 'Content-Type: application/json' \
///     -d '{ "isPinned": true }' \
///     http://localhost:3001/api/update-pin/<uuid>
/// ```
///
/// Response:
/// ```json
/// { "success": true, "msg": "Pinned note" }
/// ```
pub async fn update_pin<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(note_id): PathParameters<Uuid>,
    Form(form): Form<UpdatePinForm>,
) -> Result<Success<()>, Error> {
    let is_pinned = form
        .is_pinned
        .ok_or_else(|| Error::bad_request("Pin state is required"))?;

    let values = UpdateNoteValues {
        is_pinned: Some(is_pinned),
        ..Default::default()
    };

    storage
        .update_note(&note_id, &values)
        .await
        .map_err(Error::storage("Note pinned error"))?
        .ok_or_else(|| Error::not_found("Note not found"))?;

    tracing::debug!("Set pin of note {note_id} to {is_pinned}");

    Ok(Success::message(if is_pinned {
        "Pinned note"
    } else {
        "Unpinned note"
    }))
}

/// Delete a note for good
///
/// Request:
/// ```sh
/// curl -v -X DELETE http://localhost:3001/api/delete/<uuid>
/// ```
///
/// Response:
/// ```json
/// { "success": true, "msg": "Note deleted successfully" }
/// ```
pub async fn delete<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(note_id): PathParameters<Uuid>,
) -> Result<Success<()>, Error> {
    storage
        .delete_note(&note_id)
        .await
        .map_err(Error::storage("Server error"))?
        .ok_or_else(|| Error::not_found("Note not found"))?;

    tracing::debug!("Deleted note: {note_id}");

    Ok(Success::message("Note deleted successfully"))
}

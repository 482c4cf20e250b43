//! Form types

/// Values to create a Note
pub struct CreateNoteValues<'a> {
    /// Title of the note, already trimmed
    pub title: &'a str,

    /// Content of the note, already trimmed
    pub content: &'a str,

    /// Tags, in the order they were given
    pub tags: &'a [String],
}

/// Values to update a Note
///
/// Anything left `None` stays as it is
#[derive(Default)]
pub struct UpdateNoteValues<'a> {
    /// New title of the note
    pub title: Option<&'a str>,

    /// New content of the note
    pub content: Option<&'a str>,

    /// New tags of the note, replacing the old ones
    pub tags: Option<&'a [String]>,

    /// New pin state of the note
    pub is_pinned: Option<bool>,
}

/// Which slice of a listing to fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// Number of notes to skip
    pub skip: u64,

    /// Maximum number of notes to fetch
    pub limit: u64,
}

impl Pagination {
    /// Pagination for a 1-based page number
    pub fn from_page(page: u64, limit: u64) -> Self {
        Self {
            skip: page.saturating_sub(1).saturating_mul(limit),
            limit,
        }
    }

    /// Number of pages needed to show `total` notes
    pub fn total_pages(&self, total: u64) -> u64 {
        if self.limit == 0 {
            0
        } else {
            total.div_ceil(self.limit)
        }
    }
}

//! Notes and how they are matched by a search

use chrono::NaiveDateTime;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_pinned: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Which notes a listing should include
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoteFilter {
    /// Every note
    All,

    /// Notes with the (folded) term somewhere in the title, content or one of the tags
    Search(String),
}

impl NoteFilter {
    /// Create a filter from a free text query
    ///
    /// A blank query matches everything, anything else is used as-is (not trimmed)
    pub fn from_query(query: &str) -> Self {
        if query.trim().is_empty() {
            Self::All
        } else {
            Self::Search(fold_case(query))
        }
    }

    /// The case folded search term, if any
    pub fn search_term(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Search(term) => Some(term),
        }
    }

    /// Check if a note passes the filter
    ///
    /// Plain substring checks, the term is never treated as a pattern
    pub fn matches(&self, note: &Note) -> bool {
        let Some(term) = self.search_term() else {
            return true;
        };

        contains_folded(&note.title, term)
            || contains_folded(&note.content, term)
            || note.tags.iter().any(|tag| contains_folded(tag, term))
    }
}

/// Fold text for case-insensitive comparison
///
/// Lowercases char by char, without the context rules of `str::to_lowercase`, and maps the
/// final sigma to a regular one. Must stay in line with `fold_search_text` in the migrations.
pub fn fold_case(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|ch| if ch == 'ς' { 'σ' } else { ch })
        .collect()
}

/// `term` must already be folded
fn contains_folded(haystack: &str, term: &str) -> bool {
    fold_case(haystack).contains(term)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn note(title: &str, content: &str, tags: &[&str]) -> Note {
        let now = Utc::now().naive_utc();

        Note {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
            is_pinned: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_blank_query_matches_all() {
        assert_eq!(NoteFilter::All, NoteFilter::from_query(""));
        assert_eq!(NoteFilter::All, NoteFilter::from_query("   "));
        assert!(NoteFilter::from_query(" ").matches(&note("a", "b", &[])));
    }

    #[test]
    fn test_query_is_not_trimmed() {
        assert_eq!(
            NoteFilter::Search(" hello".to_string()),
            NoteFilter::from_query(" Hello")
        );
    }

    #[test]
    fn test_matches_case_insensitive() {
        let note = note("Hello World", "body", &[]);

        assert!(NoteFilter::from_query("hello").matches(&note));
        assert!(NoteFilter::from_query("HELLO").matches(&note));
        assert!(NoteFilter::from_query("lo wo").matches(&note));
        assert!(!NoteFilter::from_query("goodbye").matches(&note));
    }

    #[test]
    fn test_matches_content_and_tags() {
        let note = note("Groceries", "Buy milk", &["Errands", "weekly"]);

        assert!(NoteFilter::from_query("MILK").matches(&note));
        assert!(NoteFilter::from_query("errand").matches(&note));
        assert!(NoteFilter::from_query("eek").matches(&note));
        assert!(!NoteFilter::from_query("monthly").matches(&note));
    }

    #[test]
    fn test_matches_non_ascii() {
        let note = note("ÄPFEL kaufen", "Straße", &["Ärger"]);

        assert!(NoteFilter::from_query("äpfel").matches(&note));
        assert!(NoteFilter::from_query("STRAßE").matches(&note));
        assert!(NoteFilter::from_query("ärg").matches(&note));
    }

    #[test]
    fn test_matches_final_sigma() {
        let upper = note("ΟΔΟΣ", "content", &[]);
        let lower = note("οδος", "content", &[]);

        for query in ["Σ", "σ", "ς", "οδοσ", "ΟΔΟΣ", "οδος"] {
            assert!(NoteFilter::from_query(query).matches(&upper), "query: {query}");
            assert!(NoteFilter::from_query(query).matches(&lower), "query: {query}");
        }
    }

    #[test]
    fn test_fold_case() {
        assert_eq!("äpfel", fold_case("ÄPFEL"));
        assert_eq!("οδοσ", fold_case("ΟΔΟΣ"));
        assert_eq!("οδοσ", fold_case("οδος"));
        assert_eq!("hello world", fold_case("Hello World"));
    }

    #[test]
    fn test_pattern_characters_are_literal() {
        let note = note("Budget (draft)", "costs", &[]);

        assert!(NoteFilter::from_query("(draft)").matches(&note));
        assert!(!NoteFilter::from_query(".*").matches(&note));
        assert!(!NoteFilter::from_query("b[a-z]dget").matches(&note));
    }
}

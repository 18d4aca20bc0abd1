// Scriptures MCP Type Definitions
// Core types for verses, references, search hits and errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single verse of scripture
///
/// Verses are flat value records; the store owns them and every query hands
/// out borrows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Book name, e.g. "1 Nephi"
    pub book: String,

    /// Collection the book belongs to, e.g. "Book of Mormon"
    pub collection: String,

    pub chapter: u32,

    pub verse: u32,

    pub text: String,

    /// Preformatted citation, e.g. "1 Nephi 3:7"
    pub reference: String,
}

impl Verse {
    /// Key for citation order within a book
    pub fn position(&self) -> (u32, u32) {
        (self.chapter, self.verse)
    }

    /// Key for the presentation order of search results
    pub fn sort_key(&self) -> (&str, &str, u32, u32) {
        (&self.collection, &self.book, self.chapter, self.verse)
    }
}

/// Which grammar a reference was parsed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// "Book Chapter:Verse" or "Book Chapter:Verse-EndVerse"
    Verse,
    /// "Book Chapter"
    Chapter,
}

impl ReferenceKind {
    /// Example citation shown to callers when parsing fails
    pub fn example(&self) -> &'static str {
        match self {
            ReferenceKind::Verse => "'1 Nephi 3:7' or 'John 3:16-17'",
            ReferenceKind::Chapter => "'1 Nephi 3'",
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Verse => write!(f, "scripture"),
            ReferenceKind::Chapter => write!(f, "chapter"),
        }
    }
}

/// A parsed citation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptureReference {
    pub book: String,
    pub chapter: u32,

    /// Absent for whole-chapter references
    pub verse: Option<u32>,

    /// Equal to `verse` for single-verse references
    pub end_verse: Option<u32>,
}

impl ScriptureReference {
    /// Reference to a whole chapter
    pub fn chapter(book: impl Into<String>, chapter: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse: None,
            end_verse: None,
        }
    }

    /// Reference to a verse range (inclusive)
    pub fn range(book: impl Into<String>, chapter: u32, verse: u32, end_verse: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse: Some(verse),
            end_verse: Some(end_verse),
        }
    }

    pub fn is_chapter(&self) -> bool {
        self.verse.is_none()
    }
}

impl std::fmt::Display for ScriptureReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.verse, self.end_verse) {
            (Some(start), Some(end)) if end != start => {
                write!(f, "{} {}:{}-{}", self.book, self.chapter, start, end)
            }
            (Some(start), _) => write!(f, "{} {}:{}", self.book, self.chapter, start),
            (None, _) => write!(f, "{} {}", self.book, self.chapter),
        }
    }
}

/// How a search hit was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Text or book name contains the query
    Exact,

    /// Approximate match at the given edit distance
    Fuzzy(usize),
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::Exact => write!(f, "Exact"),
            MatchKind::Fuzzy(distance) => write!(f, "Fuzzy({})", distance),
        }
    }
}

/// Search result borrowing its verse from the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub verse: &'a Verse,
    pub kind: MatchKind,
}

impl<'a> SearchHit<'a> {
    pub fn exact(verse: &'a Verse) -> Self {
        Self {
            verse,
            kind: MatchKind::Exact,
        }
    }

    pub fn fuzzy(verse: &'a Verse, distance: usize) -> Self {
        Self {
            verse,
            kind: MatchKind::Fuzzy(distance),
        }
    }
}

/// Scripture service errors
#[derive(Debug, Error)]
pub enum ScriptureError {
    #[error("could not parse {label}: {source}")]
    MalformedDocument {
        label: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not open archive {label}: {source}")]
    Archive {
        label: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("invalid {kind} reference '{input}'. Use a format like {}", .kind.example())]
    InvalidReference { input: String, kind: ReferenceKind },

    #[error("{0} cannot be empty")]
    MissingArgument(&'static str),

    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },
}

impl ScriptureError {
    pub fn invalid_reference(input: &str, kind: ReferenceKind) -> Self {
        ScriptureError::InvalidReference {
            input: input.trim().to_string(),
            kind,
        }
    }
}

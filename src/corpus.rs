// Scriptures MCP Corpus
// Verse store and collection index built once from raw JSON documents

use crate::types::{ScriptureError, Verse};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Collection name used when a document label matches no known collection
pub const UNKNOWN_COLLECTION: &str = "Unknown";

/// Label fragment → collection display name
const COLLECTION_LABELS: &[(&str, &str)] = &[
    ("book-of-mormon", "Book of Mormon"),
    ("doctrine-and-covenants", "Doctrine and Covenants"),
    ("pearl-of-great-price", "Pearl of Great Price"),
    ("old-testament", "Old Testament"),
    ("new-testament", "New Testament"),
];

/// Top-level shape of a scripture document
#[derive(Debug, Deserialize)]
struct ScriptureDocument {
    #[serde(default)]
    books: Vec<BookEntry>,
}

#[derive(Debug, Deserialize)]
struct BookEntry {
    book: String,
    #[serde(default)]
    chapters: Vec<ChapterEntry>,
}

#[derive(Debug, Deserialize)]
struct ChapterEntry {
    chapter: u32,
    #[serde(default)]
    verses: Vec<VerseEntry>,
}

#[derive(Debug, Deserialize)]
struct VerseEntry {
    verse: u32,
    text: String,
    reference: String,
}

/// Derive the collection name from a document label such as
/// "data/book-of-mormon.json"
pub fn collection_for_label(label: &str) -> &'static str {
    COLLECTION_LABELS
        .iter()
        .find(|(fragment, _)| label.contains(fragment))
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_COLLECTION)
}

/// In-memory scripture corpus
///
/// Holds every verse keyed by book, plus the books of each collection. The
/// corpus is populated once and only read afterwards, so it can be shared
/// freely between queries.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Book name → verses in document order
    verses: FxHashMap<String, Vec<Verse>>,

    /// Collection name → book names in document order
    collections: FxHashMap<String, Vec<String>>,
}

impl Corpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from labeled raw documents
    ///
    /// Documents that fail to decode are logged and skipped; the remaining
    /// documents still load.
    ///
    /// # Example
    /// ```
    /// # use scriptures_mcp::corpus::Corpus;
    /// let doc = br#"{"books":[{"book":"John","chapters":[{"chapter":3,"verses":[
    ///     {"verse":16,"text":"For God so loved the world","reference":"John 3:16"}]}]}]}"#;
    /// let corpus = Corpus::from_documents([("new-testament.json", &doc[..])]);
    /// assert_eq!(corpus.verse_count(), 1);
    /// ```
    pub fn from_documents<I, L, B>(documents: I) -> Self
    where
        I: IntoIterator<Item = (L, B)>,
        L: AsRef<str>,
        B: AsRef<[u8]>,
    {
        let mut corpus = Self::new();

        for (label, bytes) in documents {
            let label = label.as_ref();
            match corpus.add_document(label, bytes.as_ref()) {
                Ok(added) => debug!(label, verses = added, "loaded scripture document"),
                Err(e) => warn!("skipping document: {}", e),
            }
        }

        info!(
            books = corpus.book_count(),
            verses = corpus.verse_count(),
            collections = corpus.collections.len(),
            "scripture corpus loaded"
        );

        corpus
    }

    /// Decode one document and merge it into the corpus
    ///
    /// Verses are appended to any existing entries for their book. The
    /// document's collection entry replaces any earlier entry for the same
    /// collection.
    ///
    /// # Returns
    /// Number of verses added
    pub fn add_document(&mut self, label: &str, bytes: &[u8]) -> Result<usize, ScriptureError> {
        let document: ScriptureDocument =
            serde_json::from_slice(bytes).map_err(|source| ScriptureError::MalformedDocument {
                label: label.to_string(),
                source,
            })?;

        let collection = collection_for_label(label);
        let mut books_in_collection: Vec<String> = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut added = 0;

        for book in document.books {
            let mut book_verses = Vec::new();
            for chapter in book.chapters {
                for verse in chapter.verses {
                    book_verses.push(Verse {
                        book: book.book.clone(),
                        collection: collection.to_string(),
                        chapter: chapter.chapter,
                        verse: verse.verse,
                        text: verse.text,
                        reference: verse.reference,
                    });
                }
            }

            // A book without verses would leave a dangling index entry
            if book_verses.is_empty() {
                continue;
            }

            added += book_verses.len();
            if seen.insert(book.book.clone()) {
                books_in_collection.push(book.book.clone());
            }
            self.verses
                .entry(book.book)
                .or_default()
                .extend(book_verses);
        }

        self.collections
            .insert(collection.to_string(), books_in_collection);

        Ok(added)
    }

    /// Verses of a book in store order (exact, case-sensitive name)
    pub fn book(&self, name: &str) -> Option<&[Verse]> {
        self.verses.get(name).map(|v| v.as_slice())
    }

    /// Resolve a book filter: exact name first, then case-insensitive
    ///
    /// When several books differ only by case, the lexicographically
    /// smallest wins so resolution is stable.
    pub fn resolve_book(&self, name: &str) -> Option<&str> {
        if let Some((key, _)) = self.verses.get_key_value(name) {
            return Some(key.as_str());
        }
        let wanted = name.to_lowercase();
        self.verses
            .keys()
            .filter(|key| key.to_lowercase() == wanted)
            .map(|key| key.as_str())
            .min()
    }

    /// Find a collection by case-insensitive name
    ///
    /// # Returns
    /// The stored collection name and its books
    pub fn find_collection(&self, name: &str) -> Option<(&str, &[String])> {
        let wanted = name.to_lowercase();
        let mut names: Vec<&String> = self.collections.keys().collect();
        names.sort();
        names
            .into_iter()
            .find(|candidate| candidate.to_lowercase() == wanted)
            .and_then(|candidate| {
                self.collections
                    .get_key_value(candidate.as_str())
                    .map(|(k, books)| (k.as_str(), books.as_slice()))
            })
    }

    /// Books of a collection, by exact stored name
    pub fn collection_books(&self, name: &str) -> Option<&[String]> {
        self.collections.get(name).map(|b| b.as_slice())
    }

    /// All collection names, sorted
    pub fn collection_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.collections.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// All book names, sorted
    pub fn book_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.verses.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Books to visit for a query with optional filters
    ///
    /// A book filter wins over a collection filter. Without filters every
    /// book is visited in sorted order, which keeps repeated queries
    /// deterministic. Unknown filters resolve to an empty scope.
    pub fn scope(&self, book: Option<&str>, collection: Option<&str>) -> Vec<&str> {
        match (book, collection) {
            (Some(book), _) => self.resolve_book(book).into_iter().collect(),
            (None, Some(collection)) => self
                .find_collection(collection)
                .map(|(_, books)| {
                    books
                        .iter()
                        .filter(|b| self.verses.contains_key(b.as_str()))
                        .map(|b| b.as_str())
                        .collect()
                })
                .unwrap_or_default(),
            (None, None) => self.book_names(),
        }
    }

    /// Iterate the verses of the given books in order
    pub fn verses_in<'a, 'b>(
        &'a self,
        books: &'b [&'b str],
    ) -> impl Iterator<Item = &'a Verse> + 'b
    where
        'a: 'b,
    {
        books
            .iter()
            .filter_map(move |name| self.verses.get(*name))
            .flat_map(|verses| verses.iter())
    }

    pub fn book_count(&self) -> usize {
        self.verses.len()
    }

    pub fn verse_count(&self) -> usize {
        self.verses.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

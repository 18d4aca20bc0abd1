// Scriptures MCP Query Service
// Validates typed arguments, runs queries and renders text responses

use crate::corpus::Corpus;
use crate::lookup::{find_chapter, find_verses};
use crate::reference::{parse_chapter_reference, parse_reference};
use crate::search::{FuzzyPolicy, ScriptureSearch, SearchFilter};
use crate::terms::{count_terms, TermCounts};
use crate::types::{ScriptureError, SearchHit, Verse};
use serde::Deserialize;
use serde_json::Number;
use std::fmt::Write;

/// Result limit used when a search does not specify one
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Arguments for `search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchArgs {
    #[serde(default)]
    pub query: String,
    /// Any JSON number; integral floats such as `5.0` are accepted
    #[serde(default)]
    pub limit: Option<Number>,
    #[serde(default)]
    pub book: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
}

impl SearchArgs {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn book(mut self, book: impl Into<String>) -> Self {
        self.book = Some(book.into());
        self
    }

    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }
}

/// Arguments for `get_verses` and `get_chapter`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceArgs {
    #[serde(default)]
    pub reference: String,
    /// Older name for `reference`, consulted when `reference` is blank
    #[serde(default)]
    pub query: Option<String>,
}

impl ReferenceArgs {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            query: None,
        }
    }

    /// The citation to look up
    pub fn citation(&self) -> &str {
        match self.query.as_deref() {
            Some(query) if self.reference.trim().is_empty() => query,
            _ => &self.reference,
        }
    }
}

/// Arguments for `list_books`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBooksArgs {
    #[serde(default)]
    pub collection: Option<String>,
}

/// Arguments for `count_terms`
#[derive(Debug, Clone, Deserialize)]
pub struct CountTermsArgs {
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(default)]
    pub book: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    /// Chapter citation restricting the count to one chapter
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default = "default_true")]
    pub ignore_common_words: bool,
}

impl CountTermsArgs {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
            book: None,
            collection: None,
            reference: None,
            ignore_common_words: true,
        }
    }

    pub fn book(mut self, book: impl Into<String>) -> Self {
        self.book = Some(book.into());
        self
    }

    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn ignore_common_words(mut self, ignore: bool) -> Self {
        self.ignore_common_words = ignore;
        self
    }
}

fn default_true() -> bool {
    true
}

/// Outcome of a well-formed query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Rendered results
    Found(String),

    /// Nothing matched; the message echoes the query and filters
    NotFound(String),
}

impl QueryOutcome {
    pub fn text(&self) -> &str {
        match self {
            QueryOutcome::Found(text) | QueryOutcome::NotFound(text) => text,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, QueryOutcome::Found(_))
    }

    pub fn into_text(self) -> String {
        match self {
            QueryOutcome::Found(text) | QueryOutcome::NotFound(text) => text,
        }
    }
}

/// Term counts together with the scope they were taken over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCountReport {
    pub counts: TermCounts,

    /// Human readable scope suffix, e.g. " in book '1 Nephi'"
    pub scope: String,

    /// Number of verses scanned
    pub verses: usize,
}

/// Query service over a loaded corpus
///
/// Each entry point validates its arguments, runs the query and renders a
/// text block. Validation failures are `Err`; empty results are
/// `QueryOutcome::NotFound`.
pub struct ScriptureService {
    corpus: Corpus,
    policy: FuzzyPolicy,
}

impl ScriptureService {
    pub fn new(corpus: Corpus) -> Self {
        Self::with_policy(corpus, FuzzyPolicy::default())
    }

    pub fn with_policy(corpus: Corpus, policy: FuzzyPolicy) -> Self {
        Self { corpus, policy }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Run a search and return the hits
    pub fn search_hits(&self, args: &SearchArgs) -> Result<Vec<SearchHit<'_>>, ScriptureError> {
        let query = required(&args.query, "search query")?;
        let limit = resolve_limit(args.limit.as_ref())?;
        let filter = search_filter(args);

        Ok(ScriptureSearch::with_policy(&self.corpus, self.policy).search(query, limit, &filter))
    }

    /// Search by keyword or phrase
    pub fn search(&self, args: &SearchArgs) -> Result<QueryOutcome, ScriptureError> {
        let hits = self.search_hits(args)?;
        let filter = search_filter(args);
        let query = args.query.trim();

        if hits.is_empty() {
            return Ok(QueryOutcome::NotFound(format!(
                "No scriptures found matching '{}'{}. Try different keywords or check spelling.",
                query,
                filter.describe()
            )));
        }

        let mut out = format!(
            "Scripture Search Results for '{}'{}:\n\n",
            query,
            filter.describe()
        );
        for (i, hit) in hits.iter().enumerate() {
            let v = hit.verse;
            let _ = write!(out, "{}. {} {}:{} - {}\n\n", i + 1, v.book, v.chapter, v.verse, v.text);
        }

        Ok(QueryOutcome::Found(out))
    }

    /// Verses named by a verse or range citation
    pub fn verses(&self, args: &ReferenceArgs) -> Result<Vec<&Verse>, ScriptureError> {
        let input = required(args.citation(), "scripture reference")?;
        let reference = parse_reference(input)?;
        Ok(find_verses(&self.corpus, &reference))
    }

    /// Look up a verse or verse range, e.g. "John 3:16-17"
    pub fn get_verses(&self, args: &ReferenceArgs) -> Result<QueryOutcome, ScriptureError> {
        let verses = self.verses(args)?;
        let input = args.citation().trim();

        if verses.is_empty() {
            return Ok(QueryOutcome::NotFound(format!(
                "Scripture reference '{}' not found.",
                input
            )));
        }

        let mut out = format!("Scripture Reference: {}\n\n", input);
        for v in verses {
            let _ = write!(out, "{} {}:{} - {}\n\n", v.book, v.chapter, v.verse, v.text);
        }

        Ok(QueryOutcome::Found(out))
    }

    /// Verses of a chapter citation, in reading order
    pub fn chapter(&self, args: &ReferenceArgs) -> Result<Vec<&Verse>, ScriptureError> {
        let input = required(args.citation(), "chapter reference")?;
        let reference = parse_chapter_reference(input)?;
        Ok(find_chapter(&self.corpus, &reference.book, reference.chapter))
    }

    /// Look up a whole chapter, e.g. "1 Nephi 3"
    pub fn get_chapter(&self, args: &ReferenceArgs) -> Result<QueryOutcome, ScriptureError> {
        let verses = self.chapter(args)?;
        let input = args.citation().trim();

        let Some(first) = verses.first() else {
            return Ok(QueryOutcome::NotFound(format!(
                "Chapter '{}' not found.",
                input
            )));
        };

        let mut out = format!("{} Chapter {}\n\n", first.book, first.chapter);
        for v in &verses {
            let _ = write!(out, "{}. {}\n\n", v.verse, v.text);
        }

        Ok(QueryOutcome::Found(out))
    }

    /// Collections in sorted order with their book counts
    pub fn list_collections(&self) -> QueryOutcome {
        let names = self.corpus.collection_names();
        if names.is_empty() {
            return QueryOutcome::NotFound("No scripture collections are loaded.".to_string());
        }

        let mut out = String::from("Available Scripture Collections:\n\n");
        for (i, name) in names.iter().enumerate() {
            let count = self.corpus.collection_books(name).map_or(0, |b| b.len());
            let _ = writeln!(out, "{}. {} ({} books)", i + 1, name, count);
        }

        QueryOutcome::Found(out)
    }

    /// Books of one collection, or every collection with its books
    pub fn list_books(&self, args: &ListBooksArgs) -> QueryOutcome {
        if let Some(wanted) = optional(&args.collection) {
            return match self.corpus.find_collection(wanted) {
                Some((name, books)) => {
                    let mut out = format!("Books in {}:\n\n", name);
                    for (i, book) in books.iter().enumerate() {
                        let _ = writeln!(out, "{}. {}", i + 1, book);
                    }
                    QueryOutcome::Found(out)
                }
                None => QueryOutcome::NotFound(format!("Collection '{}' not found.", wanted)),
            };
        }

        let names = self.corpus.collection_names();
        if names.is_empty() {
            return QueryOutcome::NotFound("No scripture collections are loaded.".to_string());
        }

        let mut out = String::from("Scripture Collections and Books:\n\n");
        for name in names {
            let books = self.corpus.collection_books(name).unwrap_or_default();
            let _ = writeln!(out, "## {} ({} books)", name, books.len());
            for book in books {
                let _ = writeln!(out, "- {}", book);
            }
            out.push('\n');
        }

        QueryOutcome::Found(out)
    }

    /// Count terms over the requested scope
    ///
    /// A chapter reference wins over a book filter, which wins over a
    /// collection filter.
    pub fn term_counts(&self, args: &CountTermsArgs) -> Result<TermCountReport, ScriptureError> {
        let terms: Vec<&str> = args
            .terms
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();
        if terms.is_empty() {
            return Err(ScriptureError::MissingArgument("terms"));
        }

        if let Some(input) = optional(&args.reference) {
            let reference = parse_chapter_reference(input)?;
            let verses = find_chapter(&self.corpus, &reference.book, reference.chapter);
            return Ok(TermCountReport {
                counts: count_terms(verses.iter().copied(), &terms, args.ignore_common_words),
                scope: format!(" in '{}'", reference),
                verses: verses.len(),
            });
        }

        let book = optional(&args.book);
        let collection = optional(&args.collection);
        let scope = self.corpus.scope(book, collection);
        let verses: Vec<&Verse> = self.corpus.verses_in(&scope).collect();

        let filter = SearchFilter {
            book: book.map(str::to_string),
            collection: collection.map(str::to_string),
        };

        Ok(TermCountReport {
            counts: count_terms(verses.iter().copied(), &terms, args.ignore_common_words),
            scope: filter.describe(),
            verses: verses.len(),
        })
    }

    /// Count occurrences of terms, optionally scoped
    pub fn count_terms(&self, args: &CountTermsArgs) -> Result<QueryOutcome, ScriptureError> {
        let report = self.term_counts(args)?;

        if report.verses == 0 {
            return Ok(QueryOutcome::NotFound(format!(
                "No scriptures found{} to count terms in.",
                report.scope
            )));
        }

        let mut out = format!("Term Counts{}:\n\n", report.scope);
        let mut listed: Vec<String> = Vec::new();
        for term in args.terms.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            let key = term.to_lowercase();
            if listed.contains(&key) {
                continue;
            }
            let count = report.counts.get(&key).copied().unwrap_or(0);
            let _ = writeln!(out, "'{}': {} occurrences", term, count);
            listed.push(key);
        }

        Ok(QueryOutcome::Found(out))
    }
}

/// Trimmed required string argument
fn required<'a>(value: &'a str, name: &'static str) -> Result<&'a str, ScriptureError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ScriptureError::MissingArgument(name))
    } else {
        Ok(value)
    }
}

/// Trimmed optional string argument; blank counts as absent
fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Positive whole-number limit; `5` and `5.0` both mean five
fn resolve_limit(limit: Option<&Number>) -> Result<usize, ScriptureError> {
    let Some(n) = limit else {
        return Ok(DEFAULT_SEARCH_LIMIT);
    };

    let whole = match (n.as_u64(), n.as_f64()) {
        (Some(v), _) => Some(v),
        (None, Some(f)) if f.fract() == 0.0 && f >= 1.0 && f <= u64::MAX as f64 => Some(f as u64),
        _ => None,
    };

    match whole {
        Some(v) if v >= 1 => usize::try_from(v).map_err(|e| ScriptureError::InvalidArgument {
            name: "limit",
            reason: e.to_string(),
        }),
        _ => Err(ScriptureError::InvalidArgument {
            name: "limit",
            reason: format!("must be a positive integer, got {}", n),
        }),
    }
}

fn search_filter(args: &SearchArgs) -> SearchFilter {
    SearchFilter {
        book: optional(&args.book).map(str::to_string),
        collection: optional(&args.collection).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{"books": [
        {"book": "1 Nephi", "chapters": [
            {"chapter": 3, "verses": [
                {"verse": 7, "text": "I will go and do the things which the Lord hath commanded", "reference": "1 Nephi 3:7"},
                {"verse": 8, "text": "he knew that I had been blessed of the Lord", "reference": "1 Nephi 3:8"}
            ]}
        ]}
    ]}"#;

    fn service() -> ScriptureService {
        ScriptureService::new(Corpus::from_documents([("book-of-mormon.json", DOC)]))
    }

    #[test]
    fn test_resolve_limit() {
        let number = |v: f64| Number::from_f64(v).unwrap();

        assert_eq!(resolve_limit(None).unwrap(), DEFAULT_SEARCH_LIMIT);
        assert_eq!(resolve_limit(Some(&Number::from(3))).unwrap(), 3);
        assert_eq!(resolve_limit(Some(&number(5.0))).unwrap(), 5);
        assert!(matches!(
            resolve_limit(Some(&Number::from(0))),
            Err(ScriptureError::InvalidArgument { name: "limit", .. })
        ));
        assert!(resolve_limit(Some(&Number::from(-5))).is_err());
        assert!(resolve_limit(Some(&number(2.5))).is_err());
        assert!(resolve_limit(Some(&number(0.0))).is_err());
        assert!(resolve_limit(Some(&number(-3.0))).is_err());
    }

    #[test]
    fn test_reference_args_citation() {
        assert_eq!(ReferenceArgs::new("John 3:16").citation(), "John 3:16");

        let older = ReferenceArgs {
            reference: String::new(),
            query: Some("Alma 32:21".to_string()),
        };
        assert_eq!(older.citation(), "Alma 32:21");

        let both = ReferenceArgs {
            reference: "John 3:16".to_string(),
            query: Some("Alma 32:21".to_string()),
        };
        assert_eq!(both.citation(), "John 3:16");
    }

    #[test]
    fn test_optional_blank_is_absent() {
        assert_eq!(optional(&Some("  ".to_string())), None);
        assert_eq!(optional(&Some(" John ".to_string())), Some("John"));
        assert_eq!(optional(&None), None);
    }

    #[test]
    fn test_search_rendering() {
        let outcome = service().search(&SearchArgs::new("blessed")).unwrap();
        assert_eq!(
            outcome.text(),
            "Scripture Search Results for 'blessed':\n\n1. 1 Nephi 3:8 - he knew that I had been blessed of the Lord\n\n"
        );
    }

    #[test]
    fn test_search_not_found_echoes_filter() {
        let outcome = service()
            .search(&SearchArgs::new("zarahemla").book("Alma"))
            .unwrap();
        assert!(!outcome.is_found());
        assert_eq!(
            outcome.text(),
            "No scriptures found matching 'zarahemla' in book 'Alma'. Try different keywords or check spelling."
        );
    }

    #[test]
    fn test_search_empty_query() {
        let err = service().search(&SearchArgs::new("   ")).unwrap_err();
        assert!(matches!(err, ScriptureError::MissingArgument("search query")));
    }

    #[test]
    fn test_get_verses_rendering() {
        let outcome = service()
            .get_verses(&ReferenceArgs::new("1 Nephi 3:7"))
            .unwrap();
        assert!(outcome.is_found());
        assert!(outcome.text().starts_with("Scripture Reference: 1 Nephi 3:7\n\n1 Nephi 3:7 - I will go"));
    }

    #[test]
    fn test_get_chapter_rendering() {
        let outcome = service().get_chapter(&ReferenceArgs::new("1 Nephi 3")).unwrap();
        assert!(outcome.text().starts_with("1 Nephi Chapter 3\n\n7. I will go"));
        assert!(outcome.text().contains("8. he knew"));
    }

    #[test]
    fn test_count_terms_rendering() {
        let outcome = service()
            .count_terms(&CountTermsArgs::new(["Lord", "lord", "faith"]).book("1 Nephi"))
            .unwrap();
        assert_eq!(
            outcome.text(),
            "Term Counts in book '1 Nephi':\n\n'Lord': 2 occurrences\n'faith': 0 occurrences\n"
        );
    }

    #[test]
    fn test_count_terms_chapter_scope() {
        let report = service()
            .term_counts(&CountTermsArgs::new(["lord"]).reference("1 Nephi 3"))
            .unwrap();
        assert_eq!(report.counts["lord"], 2);
        assert_eq!(report.scope, " in '1 Nephi 3'");
        assert_eq!(report.verses, 2);
    }

    #[test]
    fn test_list_collections_rendering() {
        let outcome = service().list_collections();
        assert_eq!(
            outcome.text(),
            "Available Scripture Collections:\n\n1. Book of Mormon (1 books)\n"
        );
    }
}

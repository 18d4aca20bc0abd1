// Scriptures MCP Search Engine
// Exact substring pass, fuzzy edit-distance pass, deterministic ordering

use crate::corpus::Corpus;
use crate::types::{SearchHit, Verse};
use rustc_hash::FxHashSet;
use tracing::debug;

/// Length-adaptive limits for approximate matching
///
/// The defaults are heuristics: queries of up to 3 characters never match
/// approximately, 4–5 characters allow one edit, longer queries two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyPolicy {
    /// Shortest query (in characters) eligible for fuzzy matching
    pub min_query_len: usize,

    /// Longest query that still uses `short_distance`
    pub short_query_max_len: usize,

    /// Maximum edit distance for short queries
    pub short_distance: usize,

    /// Maximum edit distance for longer queries
    pub long_distance: usize,
}

impl FuzzyPolicy {
    /// Fuzzy matching disabled entirely
    pub const DISABLED: FuzzyPolicy = FuzzyPolicy {
        min_query_len: usize::MAX,
        short_query_max_len: 0,
        short_distance: 0,
        long_distance: 0,
    };

    /// Maximum edit distance for a query, or `None` if the query is too
    /// short to match approximately
    pub fn max_distance(&self, query_len: usize) -> Option<usize> {
        if query_len < self.min_query_len {
            None
        } else if query_len <= self.short_query_max_len {
            Some(self.short_distance)
        } else {
            Some(self.long_distance)
        }
    }
}

impl Default for FuzzyPolicy {
    fn default() -> Self {
        Self {
            min_query_len: 4,
            short_query_max_len: 5,
            short_distance: 1,
            long_distance: 2,
        }
    }
}

/// Optional search scope; a book filter wins over a collection filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub book: Option<String>,
    pub collection: Option<String>,
}

impl SearchFilter {
    pub fn book(name: impl Into<String>) -> Self {
        Self {
            book: Some(name.into()),
            collection: None,
        }
    }

    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            book: None,
            collection: Some(name.into()),
        }
    }

    /// Human readable scope suffix, e.g. " in book 'John'"
    pub fn describe(&self) -> String {
        match (&self.book, &self.collection) {
            (Some(book), _) => format!(" in book '{}'", book),
            (None, Some(collection)) => format!(" in collection '{}'", collection),
            (None, None) => String::new(),
        }
    }
}

/// Keyword search over a corpus
///
/// Combines:
/// - Exact matching (case-insensitive substring of text or book name)
/// - Fuzzy matching (word-level Levenshtein distance, bounded by `FuzzyPolicy`)
/// - Scope filters (book or collection)
///
/// Results are always returned sorted by `(collection, book, chapter, verse)`
/// so identical queries produce identical output.
pub struct ScriptureSearch<'a> {
    corpus: &'a Corpus,
    policy: FuzzyPolicy,
}

impl<'a> ScriptureSearch<'a> {
    /// Create a search engine with the default fuzzy policy
    pub fn new(corpus: &'a Corpus) -> Self {
        Self::with_policy(corpus, FuzzyPolicy::default())
    }

    pub fn with_policy(corpus: &'a Corpus, policy: FuzzyPolicy) -> Self {
        Self { corpus, policy }
    }

    pub fn policy(&self) -> FuzzyPolicy {
        self.policy
    }

    /// Execute a search
    ///
    /// # Arguments
    /// * `query` - Keyword or phrase
    /// * `limit` - Maximum number of hits
    /// * `filter` - Optional book/collection scope
    ///
    /// # Returns
    /// At most `limit` hits, unique by reference, in citation order
    pub fn search(&self, query: &str, limit: usize, filter: &SearchFilter) -> Vec<SearchHit<'a>> {
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let query = query.to_lowercase();
        let scope = self
            .corpus
            .scope(filter.book.as_deref(), filter.collection.as_deref());

        let mut seen: FxHashSet<&'a str> = FxHashSet::default();
        let mut hits = self.exact_pass(&query, limit, &scope, &mut seen);
        let exact_count = hits.len();

        if hits.len() < limit {
            if let Some(max_distance) = self.policy.max_distance(query.chars().count()) {
                let fuzzy = self.fuzzy_pass(&query, max_distance, &scope, &seen);
                for hit in fuzzy {
                    if hits.len() >= limit {
                        break;
                    }
                    if seen.insert(hit.verse.reference.as_str()) {
                        hits.push(hit);
                    }
                }
            }
        }

        debug!(
            query = %query,
            books = scope.len(),
            exact = exact_count,
            fuzzy = hits.len() - exact_count,
            "search completed"
        );

        hits.sort_by(|a, b| a.verse.sort_key().cmp(&b.verse.sort_key()));
        hits
    }

    /// Verses whose text or book name contains the query, in scan order
    fn exact_pass(
        &self,
        query: &str,
        limit: usize,
        scope: &[&str],
        seen: &mut FxHashSet<&'a str>,
    ) -> Vec<SearchHit<'a>> {
        let mut hits = Vec::new();

        for verse in self.corpus.verses_in(scope) {
            if !contains_query(verse, query) {
                continue;
            }
            if seen.insert(verse.reference.as_str()) {
                hits.push(SearchHit::exact(verse));
                if hits.len() >= limit {
                    break;
                }
            }
        }

        hits
    }

    /// Approximate candidates not already collected, best distance first
    fn fuzzy_pass(
        &self,
        query: &str,
        max_distance: usize,
        scope: &[&str],
        seen: &FxHashSet<&'a str>,
    ) -> Vec<SearchHit<'a>> {
        let mut candidates: Vec<(usize, &'a Verse)> = self
            .corpus
            .verses_in(scope)
            .filter(|verse| !seen.contains(verse.reference.as_str()))
            .filter_map(|verse| {
                let score = fuzzy_score(query, verse);
                (score > 0 && score <= max_distance).then_some((score, verse))
            })
            .collect();

        // Stable: ties keep scan order
        candidates.sort_by_key(|(score, _)| *score);
        candidates
            .into_iter()
            .map(|(score, verse)| SearchHit::fuzzy(verse, score))
            .collect()
    }
}

/// Case-insensitive substring match on text or book name
///
/// `query` must already be lowercase.
#[inline]
fn contains_query(verse: &Verse, query: &str) -> bool {
    verse.text.to_lowercase().contains(query) || verse.book.to_lowercase().contains(query)
}

/// Smallest edit distance between the query and any word of the verse text,
/// or the verse's book name
///
/// `query` must already be lowercase.
pub fn fuzzy_score(query: &str, verse: &Verse) -> usize {
    let text = verse.text.to_lowercase();
    let best_word = text
        .split_whitespace()
        .map(|word| strsim::levenshtein(query, word))
        .min()
        .unwrap_or(usize::MAX);
    let book = strsim::levenshtein(query, &verse.book.to_lowercase());
    best_word.min(book)
}

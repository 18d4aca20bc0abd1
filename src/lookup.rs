// Scriptures MCP Exact Lookup
// Resolves parsed references against the verse store

use crate::corpus::Corpus;
use crate::types::{ScriptureReference, Verse};

/// Verses named by a reference, in store order
///
/// Book names match exactly (case-sensitive). A reference without a verse
/// component resolves to the whole chapter. Unknown books and missing
/// chapters or verses yield an empty result.
///
/// # Example
/// ```
/// # use scriptures_mcp::{corpus::Corpus, lookup::find_verses, reference::parse_reference};
/// let corpus = Corpus::new();
/// let reference = parse_reference("John 3:16").unwrap();
/// assert!(find_verses(&corpus, &reference).is_empty());
/// ```
pub fn find_verses<'a>(corpus: &'a Corpus, reference: &ScriptureReference) -> Vec<&'a Verse> {
    let Some(start) = reference.verse else {
        return find_chapter(corpus, &reference.book, reference.chapter);
    };
    let end = reference.end_verse.unwrap_or(start);

    corpus
        .book(&reference.book)
        .map(|verses| {
            verses
                .iter()
                .filter(|v| v.chapter == reference.chapter && (start..=end).contains(&v.verse))
                .collect()
        })
        .unwrap_or_default()
}

/// Every verse of a chapter, in reading order
///
/// The store keeps document order, which is not assumed to be sorted, so the
/// chapter is sorted by verse number before it is returned.
pub fn find_chapter<'a>(corpus: &'a Corpus, book: &str, chapter: u32) -> Vec<&'a Verse> {
    let mut verses: Vec<&Verse> = corpus
        .book(book)
        .map(|verses| verses.iter().filter(|v| v.chapter == chapter).collect())
        .unwrap_or_default();

    verses.sort_by_key(|v| v.verse);
    verses
}

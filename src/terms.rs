// Scriptures MCP Term Counter
// Tokenizes verse text and counts occurrences of requested terms

use crate::types::Verse;
use rustc_hash::FxHashMap;

/// Common words skipped when counting with stop-word filtering enabled
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "will", "with", "his", "her", "him", "she",
    "they", "their", "them", "this", "these", "those", "have",
];

/// Check whether a lowercase token is a stop word
#[inline]
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Split text into lowercase word tokens
///
/// Words are runs of letters, digits and apostrophes; apostrophes at either
/// end are trimmed so quoted words count as the word itself.
///
/// # Example
/// ```
/// # use scriptures_mcp::terms::tokenize;
/// let tokens: Vec<String> = tokenize("'Behold,' saith the LORD's servant").collect();
/// assert_eq!(tokens, vec!["behold", "saith", "the", "lord's", "servant"]);
/// ```
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|raw| raw.trim_matches('\'').to_lowercase())
        .filter(|token| !token.is_empty())
}

/// Occurrence counts keyed by lowercase term
pub type TermCounts = FxHashMap<String, usize>;

/// Count requested terms across verses
///
/// # Arguments
/// * `verses` - Verses in scope
/// * `terms` - Terms to count; matched case-insensitively by whole token
/// * `ignore_common_words` - Skip stop words entirely, even requested ones
///
/// # Returns
/// Map from lowercase term to count; every requested term is present
pub fn count_terms<'a, I, S>(verses: I, terms: &[S], ignore_common_words: bool) -> TermCounts
where
    I: IntoIterator<Item = &'a Verse>,
    S: AsRef<str>,
{
    let mut counts: TermCounts = terms
        .iter()
        .map(|term| (term.as_ref().trim().to_lowercase(), 0))
        .filter(|(term, _)| !term.is_empty())
        .collect();

    if counts.is_empty() {
        return counts;
    }

    for verse in verses {
        for token in tokenize(&verse.text) {
            if ignore_common_words && is_stop_word(&token) {
                continue;
            }
            if let Some(count) = counts.get_mut(&token) {
                *count += 1;
            }
        }
    }

    counts
}

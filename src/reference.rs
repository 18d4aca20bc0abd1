// Scriptures MCP Reference Parser
// Parses citations such as "1 Nephi 3:7", "John 3:16-17" and "Alma 32"

use crate::types::{ReferenceKind, ScriptureError, ScriptureReference};
use regex::Regex;
use std::sync::LazyLock;

/// `<book> <chapter>:<verse>[-<end>]`; the book is everything before the
/// last whitespace-separated citation token
static VERSE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(\d+):(\d+)(?:-(\d+))?$").expect("verse reference regex is valid")
});

/// `<book> <chapter>`
static CHAPTER_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+(\d+)$").expect("chapter reference regex is valid"));

/// Parse a verse or verse-range citation
///
/// # Examples
/// ```
/// # use scriptures_mcp::reference::parse_reference;
/// let r = parse_reference("John 3:16-17").unwrap();
/// assert_eq!(r.book, "John");
/// assert_eq!((r.chapter, r.verse, r.end_verse), (3, Some(16), Some(17)));
///
/// let r = parse_reference("1 Nephi 3:7").unwrap();
/// assert_eq!(r.end_verse, Some(7));
///
/// assert!(parse_reference("1 Nephi 3").is_err());
/// ```
pub fn parse_reference(input: &str) -> Result<ScriptureReference, ScriptureError> {
    let invalid = || ScriptureError::invalid_reference(input, ReferenceKind::Verse);

    let caps = VERSE_REFERENCE
        .captures(input.trim())
        .ok_or_else(invalid)?;

    let book = caps[1].trim();
    let chapter = parse_number(&caps[2]).ok_or_else(invalid)?;
    let verse = parse_number(&caps[3]).ok_or_else(invalid)?;
    let end_verse = match caps.get(4) {
        Some(end) => parse_number(end.as_str()).ok_or_else(invalid)?,
        None => verse,
    };

    Ok(ScriptureReference::range(book, chapter, verse, end_verse))
}

/// Parse a whole-chapter citation
///
/// # Examples
/// ```
/// # use scriptures_mcp::reference::parse_chapter_reference;
/// let r = parse_chapter_reference("1 Nephi 3").unwrap();
/// assert_eq!(r.book, "1 Nephi");
/// assert_eq!(r.chapter, 3);
/// assert!(r.verse.is_none());
///
/// assert!(parse_chapter_reference("1 Nephi 3:7").is_err());
/// ```
pub fn parse_chapter_reference(input: &str) -> Result<ScriptureReference, ScriptureError> {
    let invalid = || ScriptureError::invalid_reference(input, ReferenceKind::Chapter);

    let caps = CHAPTER_REFERENCE
        .captures(input.trim())
        .ok_or_else(invalid)?;

    let book = caps[1].trim();
    let chapter = parse_number(&caps[2]).ok_or_else(invalid)?;

    Ok(ScriptureReference::chapter(book, chapter))
}

/// Digit runs that overflow are treated as unparseable
#[inline]
fn parse_number(digits: &str) -> Option<u32> {
    digits.parse().ok()
}

// Property tests for search and reference parsing

mod common;

use proptest::prelude::*;
use scriptures_mcp::{
    parse_chapter_reference, parse_reference, FuzzyPolicy, MatchKind, ScriptureSearch,
    SearchFilter,
};

fn query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("the".to_string()),
        Just("lord".to_string()),
        Just("world".to_string()),
        Just("faith".to_string()),
        "[a-z]{1,8}",
    ]
}

fn filter_strategy() -> impl Strategy<Value = SearchFilter> {
    prop_oneof![
        Just(SearchFilter::default()),
        Just(SearchFilter::book("John")),
        Just(SearchFilter::book("alma")),
        Just(SearchFilter::collection("Book of Mormon")),
        Just(SearchFilter::collection("old testament")),
    ]
}

proptest! {
    #[test]
    fn prop_search_is_deterministic(query in query_strategy(), limit in 1usize..12, filter in filter_strategy()) {
        let corpus = common::corpus();
        let search = ScriptureSearch::new(&corpus);
        let first = search.search(&query, limit, &filter);
        let second = search.search(&query, limit, &filter);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_results_capped_unique_and_ordered(query in query_strategy(), limit in 1usize..12, filter in filter_strategy()) {
        let corpus = common::corpus();
        let hits = ScriptureSearch::new(&corpus).search(&query, limit, &filter);

        prop_assert!(hits.len() <= limit);

        let mut refs: Vec<&str> = hits.iter().map(|h| h.verse.reference.as_str()).collect();
        refs.sort_unstable();
        refs.dedup();
        prop_assert_eq!(refs.len(), hits.len());

        for pair in hits.windows(2) {
            prop_assert!(pair[0].verse.sort_key() <= pair[1].verse.sort_key());
        }
    }

    #[test]
    fn prop_short_queries_match_literally(query in "[a-z]{1,3}") {
        let corpus = common::corpus();
        let hits = ScriptureSearch::new(&corpus).search(&query, 50, &SearchFilter::default());
        for hit in hits {
            prop_assert_eq!(hit.kind, MatchKind::Exact);
            let haystack = format!("{} {}", hit.verse.text, hit.verse.book).to_lowercase();
            prop_assert!(haystack.contains(&query));
        }
    }

    #[test]
    fn prop_book_filter_stays_in_book(query in query_strategy()) {
        let corpus = common::corpus();
        let hits = ScriptureSearch::new(&corpus).search(&query, 50, &SearchFilter::book("JOHN"));
        for hit in hits {
            prop_assert_eq!(hit.verse.book.as_str(), "John");
        }
    }

    #[test]
    fn prop_verse_reference_parses(book in "[1-4] [A-Z][a-z]{2,8}|[A-Z][a-z]{2,8}", chapter in 1u32..200, verse in 1u32..200, span in 0u32..5) {
        let end = verse + span;
        let reference = parse_reference(&format!("{} {}:{}-{}", book, chapter, verse, end)).unwrap();
        prop_assert_eq!(reference.book, book);
        prop_assert_eq!(reference.chapter, chapter);
        prop_assert_eq!(reference.verse, Some(verse));
        prop_assert_eq!(reference.end_verse, Some(end));
    }

    #[test]
    fn prop_grammars_are_disjoint(book in "[A-Z][a-z]{2,8}", chapter in 1u32..200, verse in 1u32..200) {
        let verse_ref = format!("{} {}:{}", book, chapter, verse);
        let chapter_ref = format!("{} {}", book, chapter);
        prop_assert!(parse_chapter_reference(&verse_ref).is_err());
        prop_assert!(parse_reference(&chapter_ref).is_err());
    }
}

#[test]
fn test_fuzzy_fills_after_exact() {
    let corpus = common::corpus();
    let search = ScriptureSearch::new(&corpus);

    // "faith" is exact in Alma 32:21; nothing else is within one edit
    let hits = search.search("faith", 10, &SearchFilter::default());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kind, MatchKind::Exact);

    let hits = search.search("fayth", 10, &SearchFilter::book("Alma"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kind, MatchKind::Fuzzy(1));
}

#[test]
fn test_disabled_policy_has_no_fuzzy_hits() {
    let corpus = common::corpus();
    let search = ScriptureSearch::with_policy(&corpus, FuzzyPolicy::DISABLED);
    assert!(search
        .search("fayth", 10, &SearchFilter::default())
        .is_empty());
}

#[test]
fn test_custom_policy() {
    let corpus = common::corpus();
    let lenient = FuzzyPolicy {
        min_query_len: 3,
        short_query_max_len: 5,
        short_distance: 1,
        long_distance: 2,
    };
    let hits = ScriptureSearch::with_policy(&corpus, lenient).search("lrd", 10, &SearchFilter::default());
    let refs: Vec<&str> = hits.iter().map(|h| h.verse.reference.as_str()).collect();
    assert_eq!(refs, vec!["1 Nephi 3:7", "1 Nephi 3:8", "Psalms 23:1"]);
}

#[test]
fn test_limit_applies_before_fuzzy() {
    let corpus = common::corpus();
    let hits = ScriptureSearch::new(&corpus).search("lord", 2, &SearchFilter::default());
    let refs: Vec<&str> = hits.iter().map(|h| h.verse.reference.as_str()).collect();
    assert_eq!(refs, vec!["1 Nephi 3:7", "1 Nephi 3:8"]);
}

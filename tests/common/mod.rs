// Shared scripture fixtures for integration tests

#![allow(dead_code)]

use scriptures_mcp::{Corpus, ScriptureService};

/// 1 Nephi 3:7-8 mention "Lord" twice in total
pub const BOOK_OF_MORMON: &str = r#"{"books": [
    {"book": "1 Nephi", "chapters": [
        {"chapter": 3, "verses": [
            {"verse": 7, "text": "I will go and do the things which the Lord hath commanded", "reference": "1 Nephi 3:7"},
            {"verse": 8, "text": "And it came to pass that he was exceedingly glad, for he knew that I had been blessed of the Lord", "reference": "1 Nephi 3:8"}
        ]}
    ]},
    {"book": "Alma", "chapters": [
        {"chapter": 32, "verses": [
            {"verse": 21, "text": "And now as I said concerning faith, faith is not to have a perfect knowledge of things", "reference": "Alma 32:21"},
            {"verse": 27, "text": "But behold, if ye will awake and arouse your faculties, even to an experiment upon my words", "reference": "Alma 32:27"}
        ]}
    ]}
]}"#;

/// John 3 is stored out of order; only John 3:16 contains "God"
pub const NEW_TESTAMENT: &str = r#"{"books": [
    {"book": "John", "chapters": [
        {"chapter": 3, "verses": [
            {"verse": 16, "text": "For God so loved the world, that he gave his only begotten Son", "reference": "John 3:16"},
            {"verse": 3, "text": "Verily, verily, I say unto thee, Except a man be born again, he cannot see the kingdom", "reference": "John 3:3"},
            {"verse": 17, "text": "For he sent not his Son into the world to condemn the world", "reference": "John 3:17"}
        ]}
    ]}
]}"#;

pub const OLD_TESTAMENT: &str = r#"{"books": [
    {"book": "Psalms", "chapters": [
        {"chapter": 23, "verses": [
            {"verse": 1, "text": "The LORD is my shepherd; I shall not want.", "reference": "Psalms 23:1"}
        ]}
    ]},
    {"book": "Malachi", "chapters": []}
]}"#;

pub const DOCTRINE_AND_COVENANTS: &str = r#"{"books": [
    {"book": "Doctrine and Covenants", "chapters": [
        {"chapter": 4, "verses": [
            {"verse": 2, "text": "Therefore, O ye that embark in the service of God, see that ye serve him with all your heart", "reference": "Doctrine and Covenants 4:2"}
        ]}
    ]}
]}"#;

/// The two-book store from the end-to-end scenario
pub fn scenario_corpus() -> Corpus {
    let nt = r#"{"books": [{"book": "John", "chapters": [{"chapter": 3, "verses": [
        {"verse": 16, "text": "For God so loved the world, that he gave his only begotten Son", "reference": "John 3:16"}]}]}]}"#;
    let bom = r#"{"books": [{"book": "1 Nephi", "chapters": [{"chapter": 3, "verses": [
        {"verse": 7, "text": "I will go and do the things which the Lord hath commanded", "reference": "1 Nephi 3:7"},
        {"verse": 8, "text": "he knew that I had been blessed of the Lord", "reference": "1 Nephi 3:8"}]}]}]}"#;
    Corpus::from_documents([("book-of-mormon.json", bom), ("new-testament.json", nt)])
}

/// Book of Mormon, New Testament and Old Testament fixtures
pub fn corpus() -> Corpus {
    Corpus::from_documents([
        ("book-of-mormon.json", BOOK_OF_MORMON),
        ("new-testament.json", NEW_TESTAMENT),
        ("old-testament.json", OLD_TESTAMENT),
    ])
}

pub fn service() -> ScriptureService {
    ScriptureService::new(corpus())
}

/// Write the fixture documents into a directory as a data source
pub fn write_data_dir(dir: &std::path::Path) -> std::io::Result<()> {
    std::fs::write(dir.join("book-of-mormon.json"), BOOK_OF_MORMON)?;
    std::fs::write(dir.join("new-testament.json"), NEW_TESTAMENT)?;
    std::fs::write(dir.join("old-testament.json"), OLD_TESTAMENT)?;
    std::fs::write(dir.join("doctrine-and-covenants.json"), DOCTRINE_AND_COVENANTS)?;
    Ok(())
}

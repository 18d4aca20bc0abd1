//! # Scriptures MCP: Scripture Lookup and Search Engine
//!
//! An in-memory index over five scripture collections with citation lookup,
//! keyword search with approximate matching, and word frequency counts,
//! served to MCP clients over line-delimited JSON-RPC.
//!
//! ## Query Kinds
//!
//! 1. **Reference** - Exact citation lookup
//!    - `"John 3:16"`, `"John 3:16-18"` - single verse or inclusive range
//!    - `"1 Nephi 3"` - whole chapter in reading order
//! 2. **Search** - Substring match, topped up with fuzzy matches
//!    - queries of 4+ characters tolerate one or two typos per word
//! 3. **Term counts** - Whole-word counts over a chapter, book, collection
//!    or everything, optionally skipping common words
//!
//! ## Example Usage
//!
//! ```
//! use scriptures_mcp::{Corpus, ScriptureService, SearchArgs};
//!
//! let doc = r#"{"books": [{"book": "John", "chapters": [{"chapter": 3, "verses": [
//!     {"verse": 16, "text": "For God so loved the world", "reference": "John 3:16"}]}]}]}"#;
//! let service = ScriptureService::new(Corpus::from_documents([("new-testament.json", doc)]));
//!
//! let outcome = service.search(&SearchArgs::new("loved"))?;
//! assert!(outcome.text().contains("John 3:16"));
//! # Ok::<(), scriptures_mcp::ScriptureError>(())
//! ```
//!
//! ## Architecture
//!
//! - **Data Sources** - Directory, embedded or executable-relative documents
//! - **Corpus** - Book and collection indexes built once, read-only after
//! - **Reference Parser** - Citation grammars for verses and chapters
//! - **Lookup / Search / Terms** - The query engines
//! - **Service** - Typed arguments, validation and text rendering
//! - **MCP** - JSON-RPC protocol, tool catalogue and server loop

pub mod corpus;
pub mod data;
pub mod lookup;
pub mod mcp;
pub mod reference;
pub mod search;
pub mod service;
pub mod terms;
pub mod types;

// Re-export main types and functions for convenience
pub use corpus::Corpus;
pub use data::{default_sources, load_corpus, read_archive, CorpusSource, ARCHIVE_FILE, DATA_DIR_ENV};
pub use lookup::{find_chapter, find_verses};
pub use mcp::McpServer;
pub use reference::{parse_chapter_reference, parse_reference};
pub use search::{FuzzyPolicy, ScriptureSearch, SearchFilter};
pub use service::{
    CountTermsArgs, ListBooksArgs, QueryOutcome, ReferenceArgs, ScriptureService, SearchArgs,
    TermCountReport,
};
pub use terms::{count_terms, tokenize, TermCounts};
pub use types::{MatchKind, ReferenceKind, ScriptureError, ScriptureReference, SearchHit, Verse};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! MCP Tool Definitions
//!
//! Defines the scripture tools and their input schemas.

use super::protocol::Tool;
use serde_json::json;

pub const SEARCH_SCRIPTURES: &str = "search_scriptures";
pub const GET_SCRIPTURE: &str = "get_scripture";
pub const GET_CHAPTER: &str = "get_chapter";
pub const LIST_COLLECTIONS: &str = "list_collections";
pub const LIST_BOOKS: &str = "list_books";
pub const GET_TERM_COUNTS: &str = "get_term_counts";

/// Get all available MCP tools
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: SEARCH_SCRIPTURES.into(),
            description: "Search for scriptures by keyword or phrase, with approximate matching for misspellings.".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Keyword or phrase to search for"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "default": 10,
                        "description": "Maximum number of results"
                    },
                    "book": {
                        "type": "string",
                        "description": "Only search this book, e.g. '1 Nephi'"
                    },
                    "collection": {
                        "type": "string",
                        "description": "Only search this collection, e.g. 'New Testament'"
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: GET_SCRIPTURE.into(),
            description: "Get a specific scripture reference such as '1 Nephi 3:7' or 'John 3:16-17'.".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "reference": {
                        "type": "string",
                        "description": "Verse or verse range reference"
                    }
                },
                "required": ["reference"]
            }),
        },
        Tool {
            name: GET_CHAPTER.into(),
            description: "Get a full chapter such as '1 Nephi 3'.".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "reference": {
                        "type": "string",
                        "description": "Chapter reference"
                    }
                },
                "required": ["reference"]
            }),
        },
        Tool {
            name: LIST_COLLECTIONS.into(),
            description: "List the available scripture collections.".into(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
        Tool {
            name: LIST_BOOKS.into(),
            description: "List books, optionally within one collection.".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "collection": {
                        "type": "string",
                        "description": "Collection name, e.g. 'Book of Mormon'"
                    }
                }
            }),
        },
        Tool {
            name: GET_TERM_COUNTS.into(),
            description: "Count occurrences of words in a book, collection, chapter, or all scriptures.".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "terms": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Words to count"
                    },
                    "book": {
                        "type": "string",
                        "description": "Only count within this book"
                    },
                    "collection": {
                        "type": "string",
                        "description": "Only count within this collection"
                    },
                    "reference": {
                        "type": "string",
                        "description": "Only count within this chapter, e.g. 'Alma 32'"
                    },
                    "ignore_common_words": {
                        "type": "boolean",
                        "default": true,
                        "description": "Skip common words such as 'the' and 'and'"
                    }
                },
                "required": ["terms"]
            }),
        },
    ]
}

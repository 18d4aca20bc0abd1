//! MCP Tool Handlers
//!
//! Decodes tool arguments and forwards them to the scripture service.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::service::{
    CountTermsArgs, ListBooksArgs, QueryOutcome, ReferenceArgs, ScriptureService, SearchArgs,
};
use crate::types::ScriptureError;

use super::protocol::{ToolCallResult, INVALID_PARAMS, METHOD_NOT_FOUND};
use super::tools::{
    GET_CHAPTER, GET_SCRIPTURE, GET_TERM_COUNTS, LIST_BOOKS, LIST_COLLECTIONS, SEARCH_SCRIPTURES,
};

/// A tool call that could not be dispatched
#[derive(Error, Debug)]
pub enum ToolCallError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ToolCallError {
    /// JSON-RPC error code for this failure
    pub fn code(&self) -> i32 {
        match self {
            ToolCallError::UnknownTool(_) => METHOD_NOT_FOUND,
            ToolCallError::InvalidArguments { .. } => INVALID_PARAMS,
        }
    }
}

/// Tool handlers over a scripture service
pub struct ToolHandlers {
    service: ScriptureService,
}

impl ToolHandlers {
    pub fn new(service: ScriptureService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &ScriptureService {
        &self.service
    }

    /// Handle a tool call by name
    ///
    /// Query validation failures come back as `isError` results; only an
    /// unknown tool or undecodable arguments are protocol errors.
    pub fn handle(&self, name: &str, args: Value) -> Result<ToolCallResult, ToolCallError> {
        debug!(tool = name, "dispatching tool call");

        let outcome = match name {
            SEARCH_SCRIPTURES => self.service.search(&decode::<SearchArgs>(name, args)?),
            GET_SCRIPTURE => self.service.get_verses(&decode::<ReferenceArgs>(name, args)?),
            GET_CHAPTER => self.service.get_chapter(&decode::<ReferenceArgs>(name, args)?),
            LIST_COLLECTIONS => Ok(self.service.list_collections()),
            LIST_BOOKS => Ok(self.service.list_books(&decode::<ListBooksArgs>(name, args)?)),
            GET_TERM_COUNTS => self.service.count_terms(&decode::<CountTermsArgs>(name, args)?),
            _ => return Err(ToolCallError::UnknownTool(name.to_string())),
        };

        Ok(into_result(outcome))
    }
}

fn into_result(outcome: Result<QueryOutcome, ScriptureError>) -> ToolCallResult {
    match outcome {
        Ok(outcome) => ToolCallResult::text(outcome.into_text()),
        Err(e) => ToolCallResult::error(e.to_string()),
    }
}

/// Decode tool arguments; a missing argument object decodes as `{}`
fn decode<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolCallError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };

    serde_json::from_value(args).map_err(|source| ToolCallError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}

//! JSON-RPC message linting
//!
//! Checks hand-written request lines for the mistakes that commonly turn
//! into parse errors or empty results: doubled quotes, a wrong protocol
//! version, missing tool arguments.

use serde_json::Value;
use thiserror::Error;

use super::tools::{GET_CHAPTER, GET_SCRIPTURE, SEARCH_SCRIPTURES};

/// Problem found in a request line
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LintError {
    #[error("Invalid JSON syntax - likely caused by extra quotes in query string. Found '\"\"' which should be '\"'. Error: {0}")]
    DoubledQuotes(String),

    #[error("Invalid JSON syntax: {0}")]
    Syntax(String),

    #[error("Expected a JSON object")]
    NotAnObject,

    #[error("Invalid JSON-RPC version: expected '2.0', got '{0}'")]
    Version(String),

    #[error("Missing 'method' field in JSON-RPC message")]
    MissingMethod,

    #[error("Missing tool 'name' in tools/call params")]
    MissingToolName,

    #[error("Missing 'arguments' in tools/call params")]
    MissingArguments,

    #[error("Missing required '{argument}' argument for {tool}")]
    MissingToolArgument { tool: String, argument: &'static str },

    #[error("Argument '{argument}' contains extra quotes: {value:?}. Remove the extra quotes around it")]
    StrayQuotes { argument: &'static str, value: String },
}

/// Lint a single line
///
/// Blank lines are accepted.
pub fn validate_line(line: &str) -> Result<(), LintError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(());
    }

    let value: Value = serde_json::from_str(line).map_err(|e| {
        if line.contains("\"\"") {
            LintError::DoubledQuotes(e.to_string())
        } else {
            LintError::Syntax(e.to_string())
        }
    })?;

    let msg = value.as_object().ok_or(LintError::NotAnObject)?;

    match msg.get("jsonrpc") {
        Some(Value::String(v)) if v == "2.0" => {}
        Some(Value::String(v)) => return Err(LintError::Version(v.clone())),
        Some(other) => return Err(LintError::Version(other.to_string())),
        None => return Err(LintError::Version(String::new())),
    }

    let method = msg
        .get("method")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .ok_or(LintError::MissingMethod)?;

    if method == "tools/call" {
        validate_tool_call(msg.get("params").unwrap_or(&Value::Null))?;
    }

    Ok(())
}

fn validate_tool_call(params: &Value) -> Result<(), LintError> {
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .ok_or(LintError::MissingToolName)?;

    let args = params
        .get("arguments")
        .and_then(Value::as_object)
        .ok_or(LintError::MissingArguments)?;

    let accepted: &[&'static str] = match name {
        SEARCH_SCRIPTURES => &["query"],
        GET_SCRIPTURE | GET_CHAPTER => &["reference", "query"],
        _ => return Ok(()),
    };

    let Some((argument, value)) = accepted
        .iter()
        .find_map(|key| args.get(*key).map(|v| (*key, v)))
    else {
        return Err(LintError::MissingToolArgument {
            tool: name.to_string(),
            argument: accepted[0],
        });
    };

    if let Some(s) = value.as_str() {
        if s.starts_with('"') || s.ends_with('"') {
            return Err(LintError::StrayQuotes {
                argument,
                value: s.to_string(),
            });
        }
    }

    Ok(())
}

/// Per-line lint outcome
#[derive(Debug)]
pub struct LineReport {
    /// 1-based line number
    pub line: usize,
    pub result: Result<(), LintError>,
}

/// Lint every non-blank line
pub fn validate_lines<'a, I>(lines: I) -> Vec<LineReport>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| LineReport {
            line: i + 1,
            result: validate_line(line),
        })
        .collect()
}

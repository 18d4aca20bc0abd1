//! MCP (Model Context Protocol) server for scripture queries
//!
//! Exposes the query service as MCP tools over line-delimited JSON-RPC 2.0.

pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod validate;

pub use handlers::{ToolCallError, ToolHandlers};
pub use server::McpServer;
pub use tools::get_tools;
pub use validate::{validate_line, validate_lines, LineReport, LintError};

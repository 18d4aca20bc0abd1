//! MCP Server
//!
//! Main server loop handling JSON-RPC messages, one per line.

use std::io::{BufRead, Write};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::handlers::ToolHandlers;
use super::protocol::*;
use super::tools::get_tools;
use crate::service::ScriptureService;

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "scriptures-mcp";

const PREVIEW_LEN: usize = 100;

/// MCP Server
pub struct McpServer {
    handlers: ToolHandlers,
}

impl McpServer {
    pub fn new(service: ScriptureService) -> Self {
        Self {
            handlers: ToolHandlers::new(service),
        }
    }

    /// Run the server over stdin and stdout
    pub fn run_stdio(&self) -> anyhow::Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.run(stdin.lock(), stdout.lock())
    }

    /// Serve requests until the input is exhausted
    ///
    /// Each non-blank input line is one request; each response is written as
    /// one line and flushed. Notifications produce no output.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> anyhow::Result<()> {
        info!("server started, waiting for messages");

        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!("<- {}", preview(line));

            let Some(response) = self.handle(line) else {
                continue;
            };
            let out = serde_json::to_string(&response)?;

            debug!("-> {}", preview(&out));

            writeln!(output, "{}", out)?;
            output.flush()?;
        }

        info!("server shutting down");
        Ok(())
    }

    /// Handle a single JSON-RPC message
    ///
    /// Returns `None` for notifications.
    pub fn handle(&self, msg: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(msg) {
            Ok(v) => v,
            Err(e) => {
                warn!("unparseable message: {}", e);
                return Some(JsonRpcResponse::error(None, PARSE_ERROR, e.to_string()));
            }
        };

        let id = value.get("id").cloned().filter(|id| !id.is_null());
        let req: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => return Some(JsonRpcResponse::error(id, INVALID_REQUEST, e.to_string())),
        };

        if req.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                format!("Invalid JSON-RPC version: {}", req.jsonrpc),
            ));
        }

        if req.is_notification() {
            debug!(method = %req.method, "notification");
            return None;
        }

        let id = req.id.clone();

        let response = match req.method.as_str() {
            "initialize" => {
                let result = InitializeResult {
                    protocol_version: PROTOCOL_VERSION.into(),
                    capabilities: ServerCapabilities {
                        tools: ToolsCapability {
                            list_changed: false,
                        },
                    },
                    server_info: ServerInfo {
                        name: SERVER_NAME.into(),
                        version: env!("CARGO_PKG_VERSION").into(),
                    },
                };
                respond(id, &result)
            }

            "ping" => JsonRpcResponse::success(id, Value::Object(Default::default())),

            "tools/list" => respond(id, &ToolsListResult { tools: get_tools() }),

            "tools/call" => {
                let params: ToolCallParams = match serde_json::from_value(req.params) {
                    Ok(p) => p,
                    Err(e) => return Some(JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string())),
                };

                info!(tool = %params.name, "calling tool");
                match self.handlers.handle(&params.name, params.arguments) {
                    Ok(result) => respond(id, &result),
                    Err(e) => JsonRpcResponse::error(id, e.code(), e.to_string()),
                }
            }

            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {}", req.method),
            ),
        };

        Some(response)
    }
}

fn respond<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcResponse::success(id, v),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Serialization error: {}", e)),
    }
}

fn preview(line: &str) -> String {
    match line.char_indices().nth(PREVIEW_LEN) {
        Some((idx, _)) => format!("{}...", &line[..idx]),
        None => line.to_string(),
    }
}

// Scriptures MCP Server
// Serves scripture tools to MCP clients over stdio

use anyhow::Result;
use clap::Parser;
use scriptures_mcp::{default_sources, load_corpus, McpServer, ScriptureService, DATA_DIR_ENV};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Scripture MCP server speaking JSON-RPC over stdin/stdout
#[derive(Parser, Debug)]
#[command(name = "scriptures-mcp")]
#[command(about = "MCP server for scripture lookup, search and term counts", long_about = None)]
#[command(version)]
struct Args {
    /// Directory of scripture JSON files, tried before embedded data
    #[arg(long, env = DATA_DIR_ENV, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the protocol, so logs go to stderr
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let corpus = load_corpus(&default_sources(args.data_dir));
    if corpus.is_empty() {
        warn!("no scripture data found; every query will come back empty");
    } else {
        info!(
            books = corpus.book_count(),
            verses = corpus.verse_count(),
            "scripture data loaded"
        );
    }

    McpServer::new(ScriptureService::new(corpus)).run_stdio()
}

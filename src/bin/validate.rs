// JSON-RPC Validator
// Lints request lines for the scriptures MCP server

use anyhow::Result;
use clap::Parser;
use scriptures_mcp::mcp::validate_lines;
use std::io::Read;

/// Validate JSON-RPC messages read from stdin, one per line
///
/// Catches the formatting mistakes that usually surface as parse errors
/// (-32700) or empty results from the server.
#[derive(Parser, Debug)]
#[command(name = "validate-jsonrpc")]
#[command(version)]
struct Args {
    /// Only print failing lines
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    println!("Validating JSON-RPC messages...");
    println!("=====================================");

    let reports = validate_lines(input.lines());
    let mut failures = 0;

    for report in &reports {
        match &report.result {
            Ok(()) => {
                if !args.quiet {
                    println!("✅ Line {}: Valid JSON-RPC message", report.line);
                }
            }
            Err(e) => {
                failures += 1;
                println!("❌ Line {}: {}", report.line, e);
            }
        }
    }

    println!("=====================================");
    if failures > 0 {
        println!("{} of {} messages failed validation", failures, reports.len());
        std::process::exit(1);
    }

    println!("All {} messages are valid", reports.len());
    Ok(())
}

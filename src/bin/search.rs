// Scripture Search CLI Tool
// Command-line interface for scripture lookup, search and term counts

use anyhow::Result;
use clap::{Parser, Subcommand};
use scriptures_mcp::{
    default_sources, load_corpus, CountTermsArgs, ListBooksArgs, MatchKind, QueryOutcome,
    ReferenceArgs, ScriptureService, SearchArgs, DATA_DIR_ENV,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Scripture Search Tool - Look up, search and count words in the scriptures
#[derive(Parser, Debug)]
#[command(name = "scripture-search")]
#[command(about = "Query the scriptures from the command line", long_about = None)]
#[command(version)]
struct Args {
    /// Directory of scripture JSON files
    #[arg(long, global = true, env = DATA_DIR_ENV, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Show detailed information
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search by keyword or phrase
    Search {
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "10")]
        limit: i64,

        /// Only search this book
        #[arg(short, long)]
        book: Option<String>,

        /// Only search this collection
        #[arg(short, long)]
        collection: Option<String>,

        /// Mark fuzzy matches with their edit distance
        #[arg(short, long)]
        scores: bool,
    },

    /// Look up a verse or range, e.g. "John 3:16-17"
    Verse { reference: String },

    /// Look up a whole chapter, e.g. "1 Nephi 3"
    Chapter { reference: String },

    /// List collections
    Collections,

    /// List books, optionally within one collection
    Books { collection: Option<String> },

    /// Count occurrences of words
    Count {
        #[arg(required = true)]
        terms: Vec<String>,

        #[arg(short, long)]
        book: Option<String>,

        #[arg(short, long)]
        collection: Option<String>,

        /// Chapter reference, e.g. "Alma 32"
        #[arg(short, long)]
        reference: Option<String>,

        /// Count common words like "the" and "and" too
        #[arg(long)]
        all_words: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let corpus = load_corpus(&default_sources(args.data_dir));
    if args.verbose {
        println!(
            "✅ Scriptures loaded: {} verses in {} books\n",
            corpus.verse_count(),
            corpus.book_count()
        );
    }
    let service = ScriptureService::new(corpus);

    let outcome = match args.command {
        Command::Search {
            query,
            limit,
            book,
            collection,
            scores,
        } => {
            let search = SearchArgs {
                query,
                limit: Some(limit.into()),
                book,
                collection,
            };
            if scores {
                print_scored(&service, &search)?;
                return Ok(());
            }
            service.search(&search)?
        }
        Command::Verse { reference } => service.get_verses(&ReferenceArgs::new(reference))?,
        Command::Chapter { reference } => service.get_chapter(&ReferenceArgs::new(reference))?,
        Command::Collections => service.list_collections(),
        Command::Books { collection } => service.list_books(&ListBooksArgs { collection }),
        Command::Count {
            terms,
            book,
            collection,
            reference,
            all_words,
        } => service.count_terms(&CountTermsArgs {
            terms,
            book,
            collection,
            reference,
            ignore_common_words: !all_words,
        })?,
    };

    match outcome {
        QueryOutcome::Found(text) => print!("{}", text),
        QueryOutcome::NotFound(text) => println!("❌ {}", text),
    }

    Ok(())
}

/// Print search hits with their match kind
fn print_scored(service: &ScriptureService, args: &SearchArgs) -> Result<()> {
    let hits = service.search_hits(args)?;

    if hits.is_empty() {
        println!("❌ No matches found.");
        return Ok(());
    }

    println!("✅ Found {} matches:\n", hits.len());
    for (idx, hit) in hits.iter().enumerate() {
        println!("{}. {:<24} [{}]", idx + 1, hit.verse.reference, match_label(hit.kind));
        println!("      {}\n", hit.verse.text);
    }

    Ok(())
}

fn match_label(kind: MatchKind) -> String {
    match kind {
        MatchKind::Exact => "exact".to_string(),
        MatchKind::Fuzzy(distance) => format!("fuzzy {}", distance_bar(distance)),
    }
}

/// Visual edit distance, one block per edit
fn distance_bar(distance: usize) -> String {
    let mut bar = String::from("[");
    for _ in 0..distance {
        bar.push('█');
    }
    bar.push(']');
    bar
}

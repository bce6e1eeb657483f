//! Bookcase CLI - query and maintain a book catalog file

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse a `key=value` argument
fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("'{}' is not in key=value form", s))
}

#[derive(Parser)]
#[command(name = "bookcase")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Library file
    #[arg(short, long, global = true, default_value = "library.json")]
    library: PathBuf,

    /// Settings file (currency, books per page)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find books matching filter attributes and render them
    Find {
        /// Filters as key=value (id, author_name, year, publisher, category, tag)
        #[arg(value_parser = parse_pair)]
        filters: Vec<(String, String)>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List one page of published books
    Archive {
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the published books of a category
    Category {
        /// Category term ID
        term: u64,
    },

    /// Rank categories by number of books
    TopCategories {
        /// Number of categories to show
        #[arg(short = 'n', long, default_value = "5")]
        limit: usize,
    },

    /// Replace the metadata of a book
    SetMeta {
        /// Book ID
        book: u64,

        /// Fields as key=value (author-name, price, publisher, year, edition, url);
        /// fields not given are removed
        #[arg(value_parser = parse_pair)]
        fields: Vec<(String, String)>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "bookcase_cli=debug,bookcase_core=debug"
    } else {
        "bookcase_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = commands::Context::open(&cli.library, cli.settings.as_deref()).await?;

    match cli.command {
        Commands::Find { filters, json } => commands::find(&ctx, filters, json).await,

        Commands::Archive { page, json } => commands::archive(&ctx, page, json).await,

        Commands::Category { term } => commands::category(&ctx, term).await,

        Commands::TopCategories { limit } => commands::top_categories(&ctx, limit).await,

        Commands::SetMeta { book, fields } => commands::set_meta(&ctx, book, fields).await,
    }
}

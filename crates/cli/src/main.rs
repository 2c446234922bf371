//! Bookstore CLI - Catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate a catalog file
//! bookstore catalog check crates/storefront/content/books.json
//!
//! # List the books in a catalog
//! bookstore catalog list crates/storefront/content/books.json
//!
//! # Only trending books in one category
//! bookstore catalog list books.json --category fiction --trending
//! ```
//!
//! # Commands
//!
//! - `catalog check` - Validate a catalog the way the storefront does at startup
//! - `catalog list` - Print a catalog's books

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bookstore")]
#[command(author, version, about = "Bookstore CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with product catalog files
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Validate a catalog file
    Check {
        /// Path to the catalog JSON document
        path: PathBuf,
    },
    /// List the books in a catalog file
    List {
        /// Path to the catalog JSON document
        path: PathBuf,

        /// Only show books in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only show trending books
        #[arg(short, long)]
        trending: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Check { path } => commands::catalog::check(&path).await?,
            CatalogAction::List {
                path,
                category,
                trending,
            } => {
                let filter = commands::catalog::ListFilter { category, trending };
                commands::catalog::list(&path, &filter).await?;
            }
        },
    }
    Ok(())
}

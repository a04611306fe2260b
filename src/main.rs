//! CLI entry point for journal

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "journal")]
#[command(version)]
#[command(about = "A file-backed post repository for a markdown blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Override the posts directory from _config.yml
    #[arg(short, long, global = true)]
    posts_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List published posts, newest first
    #[command(alias = "ls")]
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a single post
    Show {
        /// Post slug (directory name)
        slug: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report posts that fail to load
    Check,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "journal=debug,info"
    } else {
        "journal=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let load = || -> Result<journal::Journal> {
        let journal = journal::Journal::new(&base_dir)?;
        Ok(match &cli.posts_dir {
            Some(dir) => journal.with_posts_dir(dir),
            None => journal,
        })
    };

    match cli.command {
        Commands::List { json } => {
            journal::commands::list::run(&load()?, json).await?;
        }

        Commands::Show { slug, json } => {
            journal::commands::show::run(&load()?, &slug, json).await?;
        }

        Commands::Check => {
            journal::commands::check::run(&load()?).await?;
        }

        Commands::Version => {
            println!("journal version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

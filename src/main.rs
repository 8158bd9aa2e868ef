use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use stylometer::config::{Config, VocabularyChoice};
use stylometer::corpus::session::Session;
use stylometer::ingest;
use stylometer::output::terminal;

/// Stylometer: compare writing style across authors.
///
/// Builds word-frequency profiles for a set of texts and projects them onto
/// their principal components.
#[derive(Parser)]
#[command(name = "stylometer", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the loaded documents and chunks
    Documents {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show the selected vocabulary
    Vocabulary {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show the documents × words relative frequency matrix
    Matrix {
        #[command(flatten)]
        input: InputArgs,

        /// Print the full matrix as JSON
        #[arg(long)]
        json: bool,
    },

    /// Project documents onto their principal components
    Pca {
        #[command(flatten)]
        input: InputArgs,

        /// Number of principal axes (default: STYLOMETER_DIMENSIONS or 2)
        #[arg(long, short)]
        dimensions: Option<usize>,

        /// Print coordinates as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Files or folders to analyze (folders contribute the files directly inside them)
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Author for every file (default: the name of the file's folder)
    #[arg(long)]
    author: Option<String>,

    /// Split documents into chunks of this many words (0 = no chunking)
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Vocabulary mode: union, fixed, or top-k
    #[arg(long)]
    vocabulary: Option<String>,

    /// K for the top-k vocabulary
    #[arg(long)]
    top_k: Option<usize>,

    /// Word list file for the fixed vocabulary
    #[arg(long)]
    word_list: Option<PathBuf>,
}

impl InputArgs {
    /// Apply command-line overrides on top of the environment config.
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(size) = self.chunk_size {
            config.chunk_size = size;
        }
        if let Some(mode) = &self.vocabulary {
            config.vocabulary = mode.parse::<VocabularyChoice>()?;
        }
        if let Some(k) = self.top_k {
            config.top_k = k;
        }
        if let Some(path) = &self.word_list {
            config.word_list = Some(path.clone());
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stylometer=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Documents { input } => {
            let session = load_session(&input, &mut config)?;
            terminal::display_documents(session.corpus());
        }

        Commands::Vocabulary { input } => {
            let session = load_session(&input, &mut config)?;
            terminal::display_vocabulary(session.vocabulary(), session.mode().label());
        }

        Commands::Matrix { input, json } => {
            let session = load_session(&input, &mut config)?;
            let matrix = session.frequency_matrix()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&matrix.table())?);
            } else {
                terminal::display_matrix(&matrix);
            }
        }

        Commands::Pca {
            input,
            dimensions,
            json,
        } => {
            let session = load_session(&input, &mut config)?;
            let dimensions = dimensions.unwrap_or(config.dimensions);
            let result = session.pca(dimensions)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                terminal::display_pca(&result);
            }
        }
    }

    Ok(())
}

/// Read the input files and build a session from them. Files that cannot be
/// read or ingested are reported and skipped.
fn load_session(input: &InputArgs, config: &mut Config) -> Result<Session> {
    input.apply(config)?;
    let mut session = Session::from_config(config)?;

    let collected = ingest::collect_sources(&input.paths, input.author.as_deref());
    for (path, e) in &collected.failures {
        eprintln!("  {} {}: {:#}", "Skipped".yellow(), path.display(), e);
    }

    let report = session.add_batch(collected.sources)?;
    for (name, e) in &report.failures {
        eprintln!("  {} {}: {}", "Skipped".yellow(), name, e);
    }

    if session.corpus().is_empty() {
        anyhow::bail!("No documents could be loaded from the given paths");
    }

    info!(
        documents = session.corpus().len(),
        authors = session.corpus().authors().len(),
        vocabulary = session.vocabulary().len(),
        mode = session.mode().label(),
        "Corpus ready"
    );
    Ok(session)
}

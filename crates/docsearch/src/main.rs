use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use docsearch_common::{logger, AppConfig, DocSearchError};
use docsearch_vector::{SearchContext, SearchEngine, SearchResult, SearchStats};
use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(about = "DocSearch - rank documents against a query by embedding similarity", long_about = None)]
struct Cli {
    /// Configuration file (default: ./docsearch.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    inputs: InputArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct InputArgs {
    /// Document file, one `id: content` entry per line
    #[arg(long, global = true)]
    documents: Option<PathBuf>,

    /// Embedding matrix (.npy), one row per document
    #[arg(long, global = true)]
    embeddings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the search page and JSON API
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one query and print the ranked documents
    Search {
        /// Query text
        query: String,

        /// Number of documents to return
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Print corpus statistics
    Stats,
}

/// Load config file and environment, then apply CLI overrides
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load_with(cli.config.as_deref())?;

    if let Some(documents) = &cli.inputs.documents {
        config.documents_path = documents.clone();
    }
    if let Some(embeddings) = &cli.inputs.embeddings {
        config.embeddings_path = embeddings.clone();
    }
    if let Some(Commands::Serve { host, port }) = &cli.command {
        if let Some(host) = host {
            config.server_host = host.clone();
        }
        if let Some(port) = port {
            config.server_port = *port;
        }
    }

    config.validate()?;
    Ok(config)
}

fn load_engine(config: &AppConfig) -> Result<SearchEngine> {
    let context = SearchContext::load(config).with_context(|| {
        format!(
            "Failed to load corpus ({} + {})",
            config.documents_path.display(),
            config.embeddings_path.display()
        )
    })?;
    Ok(SearchEngine::with_random_baseline(Arc::new(context))?)
}

/// Text rendering of a result list, mirroring the search page cards
fn render_results(stats: &SearchStats, results: &[SearchResult], preview_chars: usize) -> String {
    let (rows, dim) = stats.embedding_shape;
    let mut out = String::new();

    let _ = writeln!(out, "Documents loaded: {}", stats.documents);
    let _ = writeln!(out, "Embeddings shape: ({}, {})", rows, dim);
    let _ = writeln!(out, "### Top {} Relevant Documents:", results.len());
    for result in results {
        let _ = writeln!(out, "📄 {} (Score: {:.4})", result.doc_id, result.score);
        let _ = writeln!(out, "📝 {}", result.preview(preview_chars));
        let _ = writeln!(out, "---");
    }
    out
}

/// Output of one `search` run; rejected input becomes a warning line
async fn search_output(
    engine: &SearchEngine,
    query: &str,
    top_k: usize,
    preview_chars: usize,
) -> Result<String> {
    match engine.search(query, top_k).await {
        Ok(results) => Ok(render_results(&engine.stats(), &results, preview_chars)),
        Err(DocSearchError::InvalidInput(message)) => Ok(format!("⚠️ {}\n", message)),
        Err(e) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Some(Commands::Serve { .. }) | None => {
            config.ensure_directories()?;
            if config.log_to_file {
                logger::setup_logging(&config.log_dir, &config.log_level)?;
            } else {
                logger::setup_console_logging(&config.log_level)?;
            }

            tracing::info!("DocSearch starting...");
            tracing::info!("  Documents: {}", config.documents_path.display());
            tracing::info!("  Embeddings: {}", config.embeddings_path.display());

            docsearch_server::start_server(config).await?;
        }
        Some(Commands::Search { query, top_k }) => {
            logger::setup_console_logging(&config.log_level)?;

            let engine = load_engine(&config)?;
            let top_k = top_k.unwrap_or(config.default_top_k);

            print!(
                "{}",
                search_output(&engine, &query, top_k, config.preview_chars).await?
            );
        }
        Some(Commands::Stats) => {
            logger::setup_console_logging(&config.log_level)?;

            let engine = load_engine(&config)?;
            let stats = engine.stats();
            let report = engine.context().load_report();
            let (rows, dim) = stats.embedding_shape;

            println!("Documents loaded: {}", stats.documents);
            println!("Embeddings shape: ({}, {})", rows, dim);
            println!("Skipped lines: {}", report.skipped);
            println!("Duplicate IDs: {}", report.duplicates);
            println!("Encoder: {}", stats.encoder);
        }
    }

    Ok(())
}

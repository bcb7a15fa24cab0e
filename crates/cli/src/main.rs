//! Docfeed CLI
//!
//! Runs one incremental indexing pass over an externally supplied list
//! of document files and reports the counters. The checkpoint file, if
//! configured, is read before the pass and advanced to the pass start
//! time only when the pass completes without a fatal error.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use docfeed_backend::HttpBackend;
use docfeed_indexer::{
    read_checkpoint, unix_now_ms, write_checkpoint, BulkIndexer, CounterRegistry,
    ParseFailureMode,
};
use docfeed_schema::JsonFormat;
use std::path::PathBuf;
use std::sync::Arc;

mod config;

#[derive(Parser)]
#[command(name = "docfeed", version, about = "Incremental bulk document indexer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Index the given document files, skipping ones unchanged since
    /// the checkpoint
    Index(IndexArgs),
}

#[derive(Args)]
struct IndexArgs {
    /// Document files to consider
    paths: Vec<PathBuf>,

    /// Read additional document paths from a file, one per line
    #[arg(long, value_name = "FILE")]
    paths_from: Option<PathBuf>,

    /// Destination index name
    #[arg(long)]
    dest: Option<String>,

    /// Base URL of the search backend
    #[arg(long, value_name = "URL")]
    backend_url: Option<String>,

    /// Character encoding of the document files
    #[arg(long)]
    charset: Option<String>,

    /// Checkpoint as UTC epoch milliseconds (overrides the checkpoint
    /// file)
    #[arg(long, value_name = "MS")]
    checkpoint_ms: Option<i64>,

    /// File the checkpoint is read from and advanced in
    #[arg(long, value_name = "FILE")]
    checkpoint_file: Option<PathBuf>,

    /// Ignore any checkpoint and index everything
    #[arg(long)]
    full: bool,

    /// Skip and count malformed documents instead of aborting the pass
    #[arg(long)]
    skip_malformed: bool,

    /// TOML configuration file (flags override its values)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Index(args) => run_index(args).await,
    }
}

async fn run_index(args: IndexArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => config::load(path)?,
        None => config::FileConfig::default(),
    };

    let Some(backend_url) = args.backend_url.or(file_config.backend.url) else {
        bail!("no backend URL configured (use --backend-url or [backend] url)");
    };
    let Some(dest) = args.dest.or(file_config.index.dest) else {
        bail!("no destination configured (use --dest or [index] dest)");
    };

    let files = collect_paths(args.paths, args.paths_from.as_deref())?;
    let checkpoint_file = args.checkpoint_file.or(file_config.index.checkpoint_file);
    let pass_start_ms = unix_now_ms();
    let checkpoint_ms = resolve_checkpoint(
        args.full,
        args.checkpoint_ms,
        checkpoint_file.as_deref(),
        pass_start_ms,
    )
    .await?;

    let skip_malformed =
        args.skip_malformed || file_config.index.skip_malformed.unwrap_or(false);
    let charset = args
        .charset
        .or(file_config.index.charset)
        .unwrap_or_else(|| "utf-8".to_string());

    let backend = Arc::new(HttpBackend::new(backend_url)?);
    let counters = Arc::new(CounterRegistry::new());

    let mut indexer = BulkIndexer::new(
        files,
        dest,
        backend,
        Arc::new(JsonFormat),
        counters.clone(),
    )?
    .with_checkpoint(checkpoint_ms)
    .with_charset(&charset)?;
    if skip_malformed {
        indexer = indexer.with_parse_failure_mode(ParseFailureMode::Skip);
    }

    let stats = indexer.index().await.context("indexing pass failed")?;

    if let Some(path) = &checkpoint_file {
        write_checkpoint(path, pass_start_ms)
            .await
            .with_context(|| format!("failed to write checkpoint {}", path.display()))?;
    }

    println!(
        "pass complete in {} ms: {} candidates, {} skipped unmodified, {} skipped stale, {} submitted",
        stats.time_ms,
        stats.candidates,
        stats.skipped_unmodified,
        stats.skipped_stale,
        stats.submitted
    );
    for (name, value) in counters.snapshot() {
        println!("{name} = {value}");
    }
    Ok(())
}

fn collect_paths(mut paths: Vec<PathBuf>, paths_from: Option<&std::path::Path>) -> Result<Vec<PathBuf>> {
    if let Some(list) = paths_from {
        let text = std::fs::read_to_string(list)
            .with_context(|| format!("failed to read path list {}", list.display()))?;
        paths.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(PathBuf::from),
        );
    }
    Ok(paths)
}

/// Checkpoint precedence: `--full` beats an explicit `--checkpoint-ms`,
/// which beats the checkpoint file; with none of them the pass start
/// time is used (nothing gets indexed unless documents claim a future
/// update).
async fn resolve_checkpoint(
    full: bool,
    explicit_ms: Option<i64>,
    checkpoint_file: Option<&std::path::Path>,
    pass_start_ms: i64,
) -> Result<i64> {
    if full {
        return Ok(0);
    }
    if let Some(ms) = explicit_ms {
        return Ok(ms);
    }
    if let Some(path) = checkpoint_file {
        if let Some(persisted) = read_checkpoint(path)
            .await
            .with_context(|| format!("failed to read checkpoint {}", path.display()))?
        {
            return Ok(persisted.checkpoint_ms);
        }
        log::info!(
            "no checkpoint at {}; starting from the pass start time",
            path.display()
        );
    }
    Ok(pass_start_ms)
}

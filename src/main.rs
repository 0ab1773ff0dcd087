//! Nuxt Route Links - Entry Point
//!
//! This is the main entry point for the nuxt-route-links language server.
//! It sets up logging, parses arguments, and either serves LSP over stdio
//! or scans a single file and prints its links.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use nuxt_route_links::lsp::run_stdio;
use nuxt_route_links::lsp::types::{LineIndex, from_lsp_position};
use nuxt_route_links::scanner::{self, LinkKind};

/// Language server linking Nuxt API calls and GraphQL operations to files.
#[derive(Parser, Debug)]
#[command(name = "nuxt-route-links")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve LSP over stdio (default).
    Serve {
        /// Workspace root; overrides the root sent by the client.
        #[arg(short, long)]
        workspace: Option<PathBuf>,
    },
    /// Print the links found in a file as JSON.
    Scan {
        /// File to scan.
        file: PathBuf,
    },
}

impl Args {
    /// Parses the log level string into a tracing Level.
    fn parse_log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            other => anyhow::bail!("invalid log level: {}", other),
        }
    }
}

/// One link as printed by `scan`.
#[derive(Debug, Serialize)]
struct LinkReport {
    kind: LinkKind,
    token: String,
    line: u32,
    column: u32,
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<String>,
}

/// Scans `text` and converts hits into 1-indexed reports.
fn link_reports(text: &str) -> Vec<LinkReport> {
    let index = LineIndex::new(text);
    scanner::scan(text)
        .into_iter()
        .map(|hit| {
            let (line, column) = from_lsp_position(index.position(hit.range.start));
            let target = hit.target();
            LinkReport {
                kind: hit.kind,
                token: hit.token,
                line,
                column,
                query: target.query,
                method: target.method,
            }
        })
        .collect()
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(level: Level) -> Result<()> {
    // Create an env filter that respects RUST_LOG but has a default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "nuxt_route_links={level},tower={level},async_lsp={level}"
        ))
    });

    // Logs go to stderr; stdout carries the protocol
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    Ok(())
}

/// Main entry point.
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = args.parse_log_level()?;
    init_tracing(log_level)?;

    match args.command {
        Some(Command::Scan { file }) => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let reports = link_reports(&text);
            let json =
                serde_json::to_string_pretty(&reports).context("failed to serialize links")?;
            println!("{json}");
        }
        Some(Command::Serve { workspace }) => serve(workspace).await?,
        None => serve(None).await?,
    }

    Ok(())
}

async fn serve(workspace: Option<PathBuf>) -> Result<()> {
    // Canonicalize the workspace path
    let workspace = workspace
        .map(|path| {
            path.canonicalize().with_context(|| {
                format!("failed to canonicalize workspace path: {}", path.display())
            })
        })
        .transpose()?;

    info!(workspace = ?workspace, "starting nuxt-route-links language server");

    run_stdio(workspace)
        .await
        .context("language server terminated with an error")?;

    info!("language server shut down gracefully");
    Ok(())
}

//! tvsurf - terminal browser for the TVMaze show directory.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};
use crate::tui::run_browser;
use tvsurf_api::catalog::{CatalogClient, LocalCatalogApi};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse the show directory interactively.
    Browse(BrowseArgs),
    /// Search the show directory and print results.
    Search(SearchArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Listing query for the Home tab. Falls back to the config default ("all").
    #[arg(long)]
    query: Option<String>,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "batman").
    #[arg(long, required = true)]
    query: String,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

/// Loads the app config for the given directory override.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds a `CatalogClient`, honoring the config base URL override.
///
/// # Errors
///
/// Returns an error if the configured base URL is invalid or the client
/// fails to build.
#[instrument(skip_all)]
fn build_catalog_client(config: &AppConfig) -> Result<CatalogClient> {
    let mut builder = CatalogClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    if let Some(base) = &config.catalog.base_url {
        let url = Url::parse(base).with_context(|| format!("invalid catalog base_url: {base}"))?;
        builder = builder.base_url(url);
    }

    builder.build().context("failed to build catalog client")
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if config loading, client building, or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_catalog_client(&config)?;

    let query = args
        .query
        .clone()
        .unwrap_or_else(|| config.browse.default_query.clone());

    run_browser(client, query).await.context("browser TUI failed")
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_catalog_client(&config)?;

    let entries = client
        .search_shows(&args.query)
        .await
        .context("catalog search request failed")?;

    tracing::info!("ID\tName\t\t\tPremiered\tRating\tURL");
    for entry in &entries {
        let show = &entry.show;
        tracing::info!(
            "{}\t{}\t{}\t{}\t{}",
            show.id,
            show.name,
            show.premiered.as_deref().unwrap_or("-"),
            show.rating
                .as_ref()
                .and_then(|r| r.average)
                .map_or_else(|| String::from("-"), |avg| format!("{avg:.1}")),
            show.url.as_deref().unwrap_or("-"),
        );
    }
    tracing::info!("Total: {} shows", entries.len());

    Ok(())
}

/// Runs the `completions` subcommand.
fn run_completions(args: &CompletionsArgs) {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "tvsurf", &mut io::stdout());
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Browse(args) => run_browse(&args, cli.dir.as_ref()).await,
        Commands::Search(args) => run_search(&args, cli.dir.as_ref()).await,
        Commands::Completions(args) => {
            run_completions(&args);
            Ok(())
        }
    }
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use crate::api::{MovieApi, OmdbClient};
use crate::config::Config;
use crate::logging::{LogTarget, init_logging};
use crate::models::WatchedEntry;
use crate::tui::run_interactive;
use crate::utils::{PathManager, format_path_with_tilde, sanitize_text};
use crate::watched::WatchedStore;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(version)]
#[command(about = "Search movies and keep a rated watched list", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: <config_dir>/popcorn/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// OMDb API key
    #[arg(long, global = true, env = "OMDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Watched list file (default: <data_dir>/popcorn/watched.json)
    #[arg(long, global = true, env = "POPCORN_WATCHED_FILE", value_name = "PATH")]
    pub watched_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show averages over the watched list
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the watched list
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search OMDb by title
    Search {
        /// Title to search for
        query: String,
    },
    /// Remove a movie from the watched list by IMDb id
    Remove {
        /// IMDb id, e.g. tt1375666
        id: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = PathManager::new()?;
    let config = load_config(&cli, &paths)?;
    let watched_path = config.watched_file_or(paths.watched_file());

    let target = match cli.command {
        Some(_) => LogTarget::Stderr,
        None => LogTarget::File(paths.log_file()),
    };
    init_logging(cli.verbose, cli.quiet, target)?;
    debug!(config = ?config_source(&cli, &paths), watched = %watched_path.display(), "resolved paths");

    match &cli.command {
        Some(Commands::Stats { json }) => show_stats(&watched_path, *json),
        Some(Commands::List { json }) => list_watched(&watched_path, *json),
        Some(Commands::Search { query }) => search_movies(&config, query),
        Some(Commands::Remove { id }) => remove_watched(&watched_path, id),
        None => run_tui(&config, &watched_path),
    }
}

fn config_source(cli: &Cli, paths: &PathManager) -> PathBuf {
    cli.config.clone().unwrap_or_else(|| paths.config_file())
}

/// Read the config file (explicit path must exist) and layer flags/env on top
fn load_config(cli: &Cli, paths: &PathManager) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_or_default(&paths.config_file())?,
    };
    config.apply_overrides(cli.api_key.clone(), cli.watched_file.clone());
    Ok(config)
}

fn show_stats(watched_path: &Path, json: bool) -> Result<()> {
    let store = WatchedStore::load(watched_path);
    let summary = store.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Watched List Statistics");
    println!("=======================");
    println!("Movies watched: {}", summary.count);
    println!("Average IMDb rating: {:.2}", summary.avg_external_rating);
    println!("Average user rating: {:.2}", summary.avg_user_rating);
    println!("Average runtime: {:.2} min", summary.avg_runtime_minutes);
    println!();
    println!("Watched file: {}", format_path_with_tilde(watched_path));

    Ok(())
}

fn list_watched(watched_path: &Path, json: bool) -> Result<()> {
    let store = WatchedStore::load(watched_path);

    if json {
        println!("{}", serde_json::to_string_pretty(store.entries())?);
        return Ok(());
    }

    if store.is_empty() {
        println!("No movies in your watched list yet.");
        return Ok(());
    }

    for entry in store.entries() {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

fn format_entry(entry: &WatchedEntry) -> String {
    format!(
        "{}  {} ({})  IMDb {}  you {}/10  {} min",
        entry.id,
        sanitize_text(&entry.title),
        sanitize_text(&entry.year),
        entry.external_rating,
        entry.user_rating,
        entry.runtime_minutes
    )
}

fn search_movies(config: &Config, query: &str) -> Result<()> {
    let query = query.trim();
    if query.chars().count() <= config.min_query_len {
        bail!("Search query must be longer than {} characters", config.min_query_len);
    }

    let client = OmdbClient::from_config(config)?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let results = runtime.block_on(client.search(query))?;

    info!(query = %query, count = results.len(), "search finished");
    println!("Found {} results", results.len());
    for result in &results {
        println!(
            "{}  {} ({})",
            result.id,
            sanitize_text(&result.title),
            sanitize_text(&result.year)
        );
    }
    Ok(())
}

fn remove_watched(watched_path: &Path, id: &str) -> Result<()> {
    let mut store = WatchedStore::load(watched_path);
    let removed = store.remove(id)?;

    if removed == 0 {
        bail!("No movie with id {} in the watched list", id);
    }

    info!(id = %id, removed, "removed from watched list");
    println!("Removed {} from the watched list ({} left)", id, store.len());
    Ok(())
}

/// Build the async runtime and hand the terminal to the interactive UI
fn run_tui(config: &Config, watched_path: &Path) -> Result<()> {
    let api: Arc<dyn MovieApi> = Arc::new(OmdbClient::from_config(config)?);
    let watched = WatchedStore::load(watched_path);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    run_interactive(api, watched, config.min_query_len, runtime.handle().clone())
}

//! airport-server: CLI + JSON API for ranked airport search.

use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table};
use tracing_subscriber::EnvFilter;

use airport_core::config::{self, Config};
use airport_core::{Airport, Dataset};

mod web;

#[derive(Parser)]
#[command(name = "airport-search", version, about = "Airport search service")]
struct Cli {
    /// Config file (default: ~/.airport-search/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON dataset file (default: built-in airports)
    #[arg(long, global = true, env = "AIRPORT_SEARCH_DATASET")]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Bind port
        #[arg(long)]
        port: Option<u16>,

        /// Bearer token callers must present on /api/*
        #[arg(long, env = "AIRPORT_SEARCH_TOKEN", hide_env_values = true)]
        auth_token: Option<String>,
    },

    /// Search airports and print the ranked matches
    Search {
        /// Code, name fragment, or empty string
        query: String,
    },

    /// Look up one airport by exact IATA or ICAO code
    Lookup {
        code: String,
    },

    /// Show dataset statistics
    Stats,

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective config
    Show,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(msg: impl Display) -> ! {
    tracing::error!("{msg}");
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = config::load_config(cli.config.as_deref());
    let level = loaded
        .as_ref()
        .map(|c| c.log.level.clone())
        .unwrap_or_else(|_| "info".into());
    init_logging(&level);

    let mut config = loaded.unwrap_or_else(|e| fail(e));
    if cli.dataset.is_some() {
        config.dataset.path = cli.dataset;
    }

    match cli.command {
        Commands::Serve {
            host,
            port,
            auth_token,
        } => {
            if let Some(h) = host {
                config.server.host = h;
            }
            if let Some(p) = port {
                config.server.port = p;
            }
            if auth_token.is_some() {
                config.server.auth_token = auth_token;
            }
            cmd_serve(config).await
        }
        Commands::Search { query } => cmd_search(&config, &query),
        Commands::Lookup { code } => cmd_lookup(&config, &code),
        Commands::Stats => cmd_stats(&config),
        Commands::Config { action } => cmd_config(&config, cli.config, action),
    }
}

fn load_dataset(config: &Config) -> Dataset {
    let dataset = Dataset::load_or_builtin(config.dataset.path.as_deref()).unwrap_or_else(|e| {
        match &config.dataset.path {
            Some(p) => fail(format!("Error loading dataset {}: {e}", p.display())),
            None => fail(e),
        }
    });
    tracing::info!(airports = dataset.len(), "dataset loaded");
    dataset
}

async fn cmd_serve(config: Config) {
    let dataset = load_dataset(&config);

    if config.server.auth_token.is_none() {
        tracing::warn!("no auth token configured; /api/* accepts every caller");
    }

    let state = Arc::new(web::AppState::new(dataset, config.server.auth_token));
    if let Err(e) = web::serve(state, &config.server.host, config.server.port).await {
        fail(format!(
            "server error on {}:{}: {e}",
            config.server.host, config.server.port
        ));
    }
}

fn cmd_search(config: &Config, query: &str) {
    let dataset = load_dataset(config);
    let results = dataset.search(query);

    println!();
    println!("{} match(es) for {query:?}", results.len());
    if !results.is_empty() {
        println!();
        println!("{}", airport_table(&results));
    }
}

fn cmd_lookup(config: &Config, code: &str) {
    let dataset = load_dataset(config);
    match dataset.find_by_code(code) {
        Some(airport) => println!("{}", airport_table(&[airport])),
        None => fail(format!("No airport with code {code:?}")),
    }
}

fn cmd_stats(config: &Config) {
    let dataset = load_dataset(config);
    let stats = dataset.stats();

    println!();
    match &config.dataset.path {
        Some(p) => println!("Dataset: {}", p.display()),
        None => println!("Dataset: built-in"),
    }
    println!();
    println!("  Airports:  {}", stats.airports);

    let mut table = Table::new();
    table.set_header(vec!["Tier", "Airports"]);
    for (tier, count) in stats.tiers.iter().rev() {
        table.add_row(vec![Cell::new(tier), Cell::new(count)]);
    }
    println!();
    println!("{table}");
}

fn cmd_config(effective: &Config, path: Option<PathBuf>, action: ConfigAction) {
    match action {
        ConfigAction::Init { force } => {
            let target = path.unwrap_or_else(config::config_file);
            if target.exists() && !force {
                fail(format!(
                    "{} already exists (use --force to overwrite)",
                    target.display()
                ));
            }
            match config::save_config(&Config::default(), Some(target.as_path())) {
                Ok(written) => println!("Wrote {}", written.display()),
                Err(e) => fail(e),
            }
        }
        ConfigAction::Show => {
            let mut shown = effective.clone();
            if shown.server.auth_token.is_some() {
                shown.server.auth_token = Some("<redacted>".into());
            }
            match config::serialize_config(&shown) {
                Ok(text) => print!("{text}"),
                Err(e) => fail(e),
            }
        }
    }
}

fn airport_table(airports: &[&Airport]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["IATA", "ICAO", "Name", "Tier", "City", "Country"]);

    for apt in airports {
        table.add_row(vec![
            Cell::new(&apt.iata),
            Cell::new(&apt.icao),
            Cell::new(&apt.name),
            Cell::new(apt.tier),
            Cell::new(apt.city.as_deref().unwrap_or("-")),
            Cell::new(apt.country.as_deref().unwrap_or("-")),
        ]);
    }

    table
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_dataset_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"IATA":"SFO","ICAO":"KSFO","name":"San Francisco International","tier":9}},
               {{"IATA":"SJC","ICAO":"KSJC","name":"San Jose","tier":3}}]"#
        )
        .unwrap();

        let mut config = Config::default();
        config.dataset.path = Some(file.path().to_path_buf());
        let dataset = load_dataset(&config);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.search("san")[0].iata, "SFO");
    }

    #[test]
    fn test_load_dataset_builtin_without_path() {
        let dataset = load_dataset(&Config::default());
        assert_eq!(dataset.len(), Dataset::builtin().len());
    }

    #[test]
    fn test_config_init_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        cmd_config(
            &Config::default(),
            Some(path.clone()),
            ConfigAction::Init { force: false },
        );

        let written = config::load_config(Some(path.as_path())).unwrap();
        assert_eq!(written, Config::default());
    }

    #[test]
    fn test_config_init_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 1234\n").unwrap();

        cmd_config(
            &Config::default(),
            Some(path.clone()),
            ConfigAction::Init { force: true },
        );

        let written = config::load_config(Some(path.as_path())).unwrap();
        assert_eq!(written.server.port, 8080);
    }
}

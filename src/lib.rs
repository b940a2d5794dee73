//! rclocktray library root.
//! Exposes the CLI parser, the high-level run() function, and the attendance
//! tracker with its API client and tray surface.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod tray;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use utils::path::expand_tilde;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => {
            let path = config_path(cli);
            cli::commands::config::handle(&cli.command, cfg, &path)
        }
        Commands::Status => cli::commands::status::handle(cfg).await,
        Commands::Shifts { date } => cli::commands::shifts::handle(date.as_deref(), cfg).await,
        Commands::In => cli::commands::clock::handle_in(cfg).await,
        Commands::Out => cli::commands::clock::handle_out(cfg).await,
        Commands::Watch => cli::commands::watch::handle(cfg).await,
    }
}

fn config_path(cli: &Cli) -> std::path::PathBuf {
    cli.config
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(Config::config_file)
}

/// Structured logging on stderr; `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "rclocktray=debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // 2️⃣ load config once (init writes it, so it does not need one)
    let cfg = match cli.command {
        Commands::Init => Config::default(),
        _ => Config::load(Some(config_path(&cli).as_path()))?,
    };

    // 3️⃣ single-threaded runtime: the tracker lives on this thread only
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = rt.block_on(dispatch(&cli, &cfg));

    // stdin reads in `watch` cannot be cancelled; don't wait for them
    rt.shutdown_timeout(Duration::from_millis(200));
    result
}

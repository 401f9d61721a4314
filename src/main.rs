mod config;
mod consts;
mod environment;
mod events;
mod layout;
mod logging;
mod market;
mod pretty;
mod runtime;
mod session;
mod ui;
mod workers;

use crate::config::{Config, get_config_path};
use crate::consts::dashboard_consts::network::API_URL_ENV_VAR;
use crate::consts::dashboard_consts::storage::EXPORT_FILE_NAME;
use crate::environment::Environment;
use crate::layout::LayoutError;
use crate::logging::{LogTarget, init_logging};
use crate::pretty::{print_cmd_error, print_cmd_info};
use crate::session::{open_layout_store, run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use std::{error::Error, fs};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the dashboard
    Start {
        /// Print market events to the console instead of drawing the dashboard
        #[arg(long, action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Paint the terminal background with the theme colour
        #[arg(long, action = clap::ArgAction::SetTrue)]
        with_background: bool,

        /// Milliseconds between market refreshes (overrides the config file)
        #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
        refresh_interval_ms: Option<u64>,

        /// Layout export to import before starting
        #[arg(long, value_name = "PATH")]
        layout: Option<PathBuf>,
    },
    /// Export the saved layout as JSON
    Export {
        /// Destination file (defaults to dashboard-layout.json in the export directory)
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Validate a layout export and save its cards
    Import {
        /// Layout file to import
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Forget the saved card layout; the next refresh rebuilds it
    Reset,
    /// Print the effective configuration
    ShowConfig {
        /// Write the effective configuration to the config file
        #[arg(long, action = clap::ArgAction::SetTrue)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config_path = get_config_path()?;
    let config = Config::load_or_default(&config_path)
        .map_err(|e| format!("Failed to load config {}: {}", config_path.display(), e))?;

    // The terminal belongs to the dashboard, so the TUI logs to a file
    let log_target = match args.command {
        Command::Start {
            headless: false, ..
        } => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    let _logger = init_logging(log_target, &config.data_dir()?)?;

    let api_url_override = std::env::var(API_URL_ENV_VAR).ok();
    let environment =
        Environment::resolve(api_url_override.as_deref().or(config.api_url.as_deref()));

    match args.command {
        Command::Start {
            headless,
            with_background,
            refresh_interval_ms,
            layout,
        } => {
            let refresh_interval = refresh_interval_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.refresh_interval());
            let session =
                match setup_session(&config, environment, refresh_interval, layout.as_deref())
                    .await
                {
                    Ok(session) => session,
                    Err(e) => {
                        print_cmd_error!("Failed to start the dashboard", "{}", e);
                        return Err(e);
                    }
                };
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::Export { output } => {
            let path = output.unwrap_or_else(|| config.export_dir().join(EXPORT_FILE_NAME));
            let store = open_layout_store(&config)?;
            store.export_layout().write_to(&path)?;
            print_cmd_info!(
                "Layout exported",
                "{} cards written to {}",
                store.cards().len(),
                path.display()
            );
            Ok(())
        }
        Command::Import { path } => {
            let mut store = open_layout_store(&config)?;
            let result = fs::read_to_string(&path)
                .map_err(LayoutError::from)
                .and_then(|json| store.import_json(&json));
            if let Err(e) = result {
                print_cmd_error!("Invalid layout file", "{}: {}", path.display(), e);
                return Err(e.into());
            }
            print_cmd_info!(
                "Layout imported",
                "{} cards saved from {}",
                store.cards().len(),
                path.display()
            );
            Ok(())
        }
        Command::Reset => {
            let mut store = open_layout_store(&config)?;
            store.clear_persisted()?;
            print_cmd_info!(
                "Layout reset",
                "Saved cards cleared; the next refresh rebuilds them"
            );
            Ok(())
        }
        Command::ShowConfig { write } => {
            if write {
                config.save(&config_path)?;
            }
            let rendered = serde_json::to_string_pretty(&config)?;
            let config_state = if write {
                "written"
            } else if fs::metadata(&config_path).is_ok() {
                "loaded"
            } else {
                "defaults, file not found"
            };
            print_cmd_info!(
                "Configuration",
                "{} ({})\n{}",
                config_path.display(),
                config_state,
                rendered
            );
            println!("API: {} ({})", environment.api_url(), environment);
            println!("Data directory: {}", config.data_dir()?.display());
            println!("Export directory: {}", config.export_dir().display());
            Ok(())
        }
    }
}

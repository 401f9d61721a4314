//! Session setup and initialization

use crate::config::Config;
use crate::environment::Environment;
use crate::events::Event;
use crate::layout::{FileStorage, LayoutSnapshot, LayoutStore};
use crate::market::MarketClient;
use crate::runtime::start_refresh_worker;
use crate::workers::core::WorkerConfig;
use log::info;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
#[derive(Debug)]
pub struct SessionData {
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Join handles for worker tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    /// Layout restored from storage, or imported with `--layout`
    pub layout: LayoutStore,
    /// Market backend being polled
    pub environment: Environment,
    /// Period between scheduled fetches
    pub refresh_interval: Duration,
    /// How long the splash stays up
    pub preload_gate: Duration,
    /// Where the TUI export/import keys read and write
    pub export_dir: PathBuf,
}

/// Opens the layout store over the configured data directory.
pub fn open_layout_store(config: &Config) -> Result<LayoutStore, Box<dyn Error>> {
    let storage = FileStorage::new(config.data_dir()?);
    info!("Layout storage at {}", storage.dir().display());
    let store = LayoutStore::open(Box::new(storage), config.theme);
    if !store.has_persisted_layout() {
        info!("No saved card layout; the first market load will create one");
    }
    Ok(store)
}

/// Sets up a dashboard session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Opens the layout store and applies an optional startup layout
/// 2. Sets up shutdown channel
/// 3. Starts the refresh scheduler
/// 4. Returns session data for mode-specific handling
///
/// # Arguments
/// * `config` - Loaded configuration
/// * `env` - Market backend to poll
/// * `refresh_interval` - Period between scheduled fetches
/// * `layout_file` - Optional layout export to import before starting
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - Session setup failed
pub async fn setup_session(
    config: &Config,
    env: Environment,
    refresh_interval: Duration,
    layout_file: Option<&Path>,
) -> Result<SessionData, Box<dyn Error>> {
    let mut layout = open_layout_store(config)?;

    if let Some(path) = layout_file {
        let snapshot = LayoutSnapshot::read_from(path)
            .map_err(|e| format!("Failed to read layout {}: {}", path.display(), e))?;
        layout
            .import_layout(snapshot)
            .map_err(|e| format!("Failed to import layout {}: {}", path.display(), e))?;
        info!("Imported startup layout from {}", path.display());
    }

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let market = Arc::new(MarketClient::new(env.clone()));
    let (event_receiver, join_handles) = start_refresh_worker(
        market,
        &WorkerConfig::new(refresh_interval),
        shutdown_sender.subscribe(),
    );

    Ok(SessionData {
        event_receiver,
        join_handles,
        shutdown_sender,
        layout,
        environment: env,
        refresh_interval,
        preload_gate: config.preload_gate(),
        export_dir: config.export_dir(),
    })
}

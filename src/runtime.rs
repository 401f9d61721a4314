//! Runtime for the market refresh worker

use crate::events::Event;
use crate::market::MarketData;
use crate::workers::core::{EventSender, WorkerConfig};
use crate::workers::fetcher::MarketFetcher;
use crate::workers::scheduler::RefreshScheduler;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Start the refresh scheduler against `market`.
///
/// Returns the channel the UI drains and the scheduler's join handles.
pub fn start_refresh_worker(
    market: Arc<dyn MarketData>,
    config: &WorkerConfig,
    shutdown: broadcast::Receiver<()>,
) -> (mpsc::Receiver<Event>, Vec<JoinHandle<()>>) {
    let (event_sender, event_receiver) =
        mpsc::channel::<Event>(crate::consts::dashboard_consts::EVENT_QUEUE_SIZE);
    let event_sender = EventSender::new(event_sender);

    let fetcher = MarketFetcher::new(market, event_sender.clone());
    let scheduler = RefreshScheduler::new(fetcher, config.refresh_interval, event_sender);

    let join_handles = vec![scheduler.activate(shutdown)];
    (event_receiver, join_handles)
}

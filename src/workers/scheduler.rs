//! Periodic market refresh
//!
//! Issues one fetch immediately on activation and one per period after that,
//! until a shutdown signal arrives. Fetches run as their own tasks, so a slow
//! response never delays the next tick.

use super::core::EventSender;
use super::fetcher::MarketFetcher;
use crate::events::EventType;
use crate::logging::LogLevel;
use log::{debug, info};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub struct RefreshScheduler {
    fetcher: MarketFetcher,
    period: Duration,
    event_sender: EventSender,
}

impl RefreshScheduler {
    pub fn new(fetcher: MarketFetcher, period: Duration, event_sender: EventSender) -> Self {
        Self {
            fetcher,
            period,
            event_sender,
        }
    }

    /// Starts the refresh loop. The returned handle completes after shutdown.
    pub fn activate(self, mut shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!("Refreshing market data every {:?}", self.period);
            self.event_sender
                .send_scheduler_event(
                    format!("Refreshing every {}s", self.period.as_secs()),
                    EventType::StateChange,
                    LogLevel::Info,
                )
                .await;

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown.recv() => break,
                    _ = ticker.tick() => {
                        debug!("Refresh tick");
                        let fetcher = self.fetcher.clone();
                        tokio::spawn(async move {
                            // Outcome already reported as events
                            let _ = fetcher.fetch_once().await;
                        });
                    }
                }
            }

            info!("Refresh scheduler stopped");
            self.event_sender
                .send_scheduler_event(
                    "Refresh scheduler stopped".to_string(),
                    EventType::StateChange,
                    LogLevel::Info,
                )
                .await;
        })
    }
}

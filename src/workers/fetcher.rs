//! A single market fetch

use super::core::EventSender;
use crate::events::Event;
use crate::logging::LogLevel;
use crate::market::error::MarketError;
use crate::market::{MarketData, normalize};
use log::{debug, error, warn};
use std::sync::Arc;

/// Fetches the market table once and reports the outcome as events.
#[derive(Clone)]
pub struct MarketFetcher {
    market: Arc<dyn MarketData>,
    event_sender: EventSender,
}

impl MarketFetcher {
    pub fn new(market: Arc<dyn MarketData>, event_sender: EventSender) -> Self {
        Self {
            market,
            event_sender,
        }
    }

    /// Reports `Loading`, then either the normalized records or the error.
    ///
    /// Returns the number of records loaded.
    pub async fn fetch_once(&self) -> Result<usize, MarketError> {
        self.event_sender.send_event(Event::fetch_started()).await;

        match self.market.fetch_markets().await {
            Ok(raw) => {
                let coins = normalize(raw);
                let count = coins.len();
                debug!("Fetched {} market rows", count);
                self.event_sender
                    .send_event(Event::fetch_succeeded(coins))
                    .await;
                Ok(count)
            }
            Err(e) => {
                let level = e.log_level();
                match level {
                    LogLevel::Error => error!("Market fetch failed: {}", e),
                    LogLevel::Warn => warn!("Market fetch failed: {}", e),
                    _ => debug!("Market fetch failed: {}", e),
                }
                self.event_sender
                    .send_event(Event::fetch_failed(e.to_string(), level))
                    .await;
                Err(e)
            }
        }
    }
}

//! Fetch status tracking
//!
//! Reduces scheduler reports into the `{status, coins, error}` view the
//! screens switch on.

use crate::market::coin::CoinRecord;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, strum::Display)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// A report from a single fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketUpdate {
    /// Request is about to be issued.
    Loading,
    /// Response arrived and was normalized.
    Loaded(Vec<CoinRecord>),
    /// Request or decoding failed; carries the error text.
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct MarketFeed {
    status: FetchStatus,
    coins: Vec<CoinRecord>,
    error: Option<String>,
}

impl MarketFeed {
    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn coins(&self) -> &[CoinRecord] {
        &self.coins
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Applies a report. Reports are applied in arrival order, so the fetch
    /// that completes last wins.
    pub fn apply(&mut self, update: MarketUpdate) {
        match update {
            MarketUpdate::Loading => {
                self.status = FetchStatus::Loading;
            }
            MarketUpdate::Loaded(coins) => {
                self.status = FetchStatus::Succeeded;
                self.coins = coins;
            }
            MarketUpdate::Failed(message) => {
                self.status = FetchStatus::Failed;
                self.error = Some(message);
            }
        }
    }
}

use crate::market::coin::RawCoin;
use crate::market::error::MarketError;

pub mod client;
pub mod coin;
pub mod error;
pub mod feed;

pub use client::MarketClient;
pub use coin::{CoinRecord, normalize};
pub use feed::{FetchStatus, MarketFeed, MarketUpdate};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch the current USD market table.
    async fn fetch_markets(&self) -> Result<Vec<RawCoin>, MarketError>;
}

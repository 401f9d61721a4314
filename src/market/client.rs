//! CoinGecko market-data client
//!
//! Issues the single `coins/markets` request the dashboard polls.

use crate::consts::dashboard_consts::network;
use crate::environment::Environment;
use crate::market::MarketData;
use crate::market::coin::RawCoin;
use crate::market::error::MarketError;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;

// User-Agent string with dashboard version
const USER_AGENT: &str = concat!("crypto-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct MarketClient {
    client: Client,
    environment: Environment,
}

impl MarketClient {
    pub fn new(environment: Environment) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(Duration::from_secs(network::REQUEST_TIMEOUT_SECS))
                .timeout(Duration::from_secs(network::REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            environment,
        }
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, MarketError> {
        if !response.status().is_success() {
            return Err(MarketError::from_response(response).await);
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl MarketData for MarketClient {
    async fn fetch_markets(&self) -> Result<Vec<RawCoin>, MarketError> {
        let url = self.build_url(network::MARKETS_ENDPOINT);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        let coins: Vec<RawCoin> = serde_json::from_slice(&response_bytes)?;
        Ok(coins)
    }
}

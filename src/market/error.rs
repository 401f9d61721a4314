//! Error handling for the market-data client

use crate::logging::LogLevel;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
    /// The response body was not a market array.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl MarketError {
    pub async fn from_response(response: reqwest::Response) -> MarketError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        MarketError::Http { status, message }
    }

    /// Classify error and determine appropriate log level
    pub fn log_level(&self) -> LogLevel {
        match self {
            // Rate limiting - the public API throttles aggressively
            MarketError::Http { status, .. } if *status == 429 => LogLevel::Debug,

            // Server errors - temporary issues
            MarketError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Authentication errors - critical
            MarketError::Http { status, .. } if *status == 401 => LogLevel::Error,
            MarketError::Http { status, .. } if *status == 403 => LogLevel::Error,

            // Network issues - usually temporary
            MarketError::Reqwest(_) => LogLevel::Warn,

            _ => LogLevel::Warn,
        }
    }
}

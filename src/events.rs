//! Event System
//!
//! Events flowing from the refresh tasks and the layout store to the UI loop

use crate::logging::{LogLevel, should_log_with_env};
use crate::market::{CoinRecord, MarketUpdate};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// Periodic trigger that launches fetches.
    Scheduler,
    /// A single market fetch.
    Fetcher,
    /// Layout persistence, export and import.
    Layout,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    StateChange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Market report carried by fetch events
    pub update: Option<MarketUpdate>,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            update: None,
        }
    }

    fn with_update(mut self, update: MarketUpdate) -> Self {
        self.update = Some(update);
        self
    }

    pub fn fetch_started() -> Self {
        Self::new(
            Worker::Fetcher,
            "Fetching market data...".to_string(),
            EventType::Refresh,
            LogLevel::Info,
        )
        .with_update(MarketUpdate::Loading)
    }

    pub fn fetch_succeeded(coins: Vec<CoinRecord>) -> Self {
        Self::new(
            Worker::Fetcher,
            format!("Loaded {} coins", coins.len()),
            EventType::Success,
            LogLevel::Info,
        )
        .with_update(MarketUpdate::Loaded(coins))
    }

    pub fn fetch_failed(message: String, log_level: LogLevel) -> Self {
        Self::new(
            Worker::Fetcher,
            format!("Failed to load data: {}", message),
            EventType::Error,
            log_level,
        )
        .with_update(MarketUpdate::Failed(message))
    }

    pub fn scheduler_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Scheduler, msg, event_type, log_level)
    }

    pub fn layout_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Layout, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // StateChange events drive the screens and are not shown as log lines
        if self.event_type == EventType::StateChange {
            return false;
        }
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

//! Core worker utilities

use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use std::time::Duration;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event. A closed receiver means the UI is gone; the event is dropped.
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_scheduler_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .sender
            .send(Event::scheduler_with_level(message, event_type, log_level))
            .await;
    }
}

/// Configuration shared by the refresh workers
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub refresh_interval: Duration,
}

impl WorkerConfig {
    pub fn new(refresh_interval: Duration) -> Self {
        Self { refresh_interval }
    }
}

//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from events

use super::state::DashboardState;

use crate::events::{Event as WorkerEvent, EventType};
use crate::layout::{LayoutError, SyncOutcome};
use crate::logging::LogLevel;
use crate::market::MarketUpdate;
use log::{debug, error, info};

use std::time::{Duration, Instant};

impl DashboardState {
    /// Update the dashboard state with new tick and queued events.
    pub fn update(&mut self) {
        self.tick += 1;

        // Process all queued events one by one
        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);
            self.add_to_activity_log(event);
        }
    }

    /// Process a single event and update relevant state
    fn process_event(&mut self, event: &WorkerEvent) {
        let Some(update) = event.update.clone() else {
            return;
        };
        let loaded = matches!(update, MarketUpdate::Loaded(_));
        if update == MarketUpdate::Loading {
            self.last_fetch_started = Some(Instant::now());
        }
        self.feed.apply(update);

        if loaded {
            self.sync_layout();
        }
    }

    /// Seeds or refreshes the card layout from the latest records.
    fn sync_layout(&mut self) {
        match self.layout.sync_with_market(self.feed.coins()) {
            Ok(SyncOutcome::Seeded(count)) => {
                self.record_layout_event(
                    format!("Card layout created with {} coins", count),
                    EventType::Success,
                    LogLevel::Info,
                );
            }
            Ok(SyncOutcome::QuotesRefreshed(count)) => {
                debug!("Refreshed quotes on {} saved cards", count);
            }
            Ok(SyncOutcome::Skipped) => {}
            Err(e) => self.report_layout_error(e),
        }
        self.clamp_cursors();
    }

    /// Records a layout event in the activity log.
    pub(super) fn record_layout_event(
        &mut self,
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.add_to_activity_log(WorkerEvent::layout_with_level(msg, event_type, log_level));
    }

    /// Surfaces a failed layout write in the footer and the log.
    pub(super) fn report_layout_error(&mut self, e: LayoutError) {
        error!("{}", e);
        let msg = e.to_string();
        self.status_line = Some(msg.clone());
        self.record_layout_event(msg, EventType::Error, LogLevel::Error);
    }

    /// Sets the footer message and mirrors it to the log.
    pub(super) fn set_status(&mut self, msg: String) {
        info!("{}", msg);
        self.status_line = Some(msg);
    }

    /// Time left until the next scheduled fetch, if one has been issued.
    pub fn time_until_refresh(&self) -> Option<Duration> {
        self.last_fetch_started
            .map(|started| self.refresh_interval.saturating_sub(started.elapsed()))
    }

    /// Share of the refresh period already elapsed, in percent.
    pub fn refresh_progress(&self) -> u16 {
        match self.last_fetch_started {
            Some(started) if !self.refresh_interval.is_zero() => {
                let ratio = started.elapsed().as_secs_f64() / self.refresh_interval.as_secs_f64();
                (ratio * 100.0).min(100.0) as u16
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::state::test_support::{dashboard, loaded_dashboard, market};
    use crate::events::Event as WorkerEvent;
    use crate::logging::LogLevel;
    use crate::market::FetchStatus;
    use tempfile::tempdir;

    #[test]
    fn first_success_seeds_cards() {
        let dir = tempdir().unwrap();
        let (state, storage) = loaded_dashboard(dir.path().to_path_buf());

        assert_eq!(state.feed.status(), FetchStatus::Succeeded);
        assert_eq!(state.layout.cards().len(), 3);
        assert!(storage.cards.lock().unwrap().is_some());
        assert!(
            state
                .activity_logs
                .iter()
                .any(|e| e.msg == "Card layout created with 3 coins")
        );
    }

    #[test]
    fn loading_starts_countdown() {
        let dir = tempdir().unwrap();
        let (mut state, _storage) = dashboard(dir.path().to_path_buf());
        assert!(state.time_until_refresh().is_none());

        state.add_event(WorkerEvent::fetch_started());
        state.update();

        assert_eq!(state.feed.status(), FetchStatus::Loading);
        assert!(state.time_until_refresh().is_some());
        assert!(state.refresh_progress() <= 100);
    }

    #[test]
    fn failure_keeps_cards_and_records_error() {
        let dir = tempdir().unwrap();
        let (mut state, _storage) = loaded_dashboard(dir.path().to_path_buf());

        state.add_event(WorkerEvent::fetch_started());
        state.add_event(WorkerEvent::fetch_failed(
            "HTTP error with status 503: down".to_string(),
            LogLevel::Warn,
        ));
        state.update();

        assert_eq!(state.feed.status(), FetchStatus::Failed);
        assert_eq!(state.layout.cards().len(), 3);
        assert_eq!(state.activity_logs.back().unwrap().log_level, LogLevel::Warn);
    }

    #[test]
    fn later_fetch_keeps_user_layout() {
        let dir = tempdir().unwrap();
        let (mut state, _storage) = loaded_dashboard(dir.path().to_path_buf());
        state.layout.remove_card(1).unwrap();

        state.add_event(WorkerEvent::fetch_succeeded(market()));
        state.update();

        assert_eq!(state.layout.cards().len(), 2);
        assert_eq!(state.feed.coins().len(), 3);
    }
}

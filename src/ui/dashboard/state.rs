//! Dashboard state management
//!
//! Contains the main dashboard state struct and related enums

use crate::consts::dashboard_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::layout::{LayoutStore, SectionId};
use crate::market::MarketFeed;
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Rendering mode of the chart section. Does not touch data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, strum::Display)]
pub enum ChartType {
    #[default]
    Line,
    Bar,
}

impl ChartType {
    pub fn toggled(self) -> Self {
        match self {
            ChartType::Line => ChartType::Bar,
            ChartType::Bar => ChartType::Line,
        }
    }
}

/// Table search box.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    /// Keystrokes go to the query while set.
    pub editing: bool,
}

#[derive(Debug)]
pub struct DashboardState {
    /// The market backend being polled.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Period between scheduled fetches, for the header countdown.
    pub refresh_interval: Duration,
    /// Directory the export/import keys read and write.
    pub export_dir: PathBuf,
    /// Whether to enable background colors
    pub with_background_color: bool,

    /// Latest fetch status and records.
    pub feed: MarketFeed,
    /// Sections, cards and theme.
    pub layout: LayoutStore,

    pub chart_type: ChartType,
    pub search: SearchState,
    /// Index into the active sections.
    pub focused: usize,
    /// Index into the card list.
    pub selected_card: usize,
    /// First table row shown.
    pub table_scroll: usize,
    /// First scrollable table column shown; `Id` and `Name` stay pinned.
    pub column_offset: usize,

    /// Blocking message, dismissed with Enter or Esc.
    pub alert: Option<String>,
    /// One-line feedback shown in the footer.
    pub status_line: Option<String>,

    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// When the most recent fetch was issued.
    pub last_fetch_started: Option<Instant>,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(environment: Environment, layout: LayoutStore, ui_config: UIConfig) -> Self {
        Self {
            environment,
            start_time: Instant::now(),
            refresh_interval: ui_config.refresh_interval,
            export_dir: ui_config.export_dir,
            with_background_color: ui_config.with_background_color,
            feed: MarketFeed::default(),
            layout,
            chart_type: ChartType::default(),
            search: SearchState::default(),
            focused: 0,
            selected_card: 0,
            table_scroll: 0,
            column_offset: 0,
            alert: None,
            status_line: None,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            last_fetch_started: None,
            tick: 0,
        }
    }

    /// The focused active section, if any section is active.
    pub fn focused_section(&self) -> Option<SectionId> {
        let order = self.layout.section_order();
        order.get(self.focused.min(order.len().saturating_sub(1))).copied()
    }

    /// Keeps cursors inside their lists after a structural change.
    pub fn clamp_cursors(&mut self) {
        let sections = self.layout.section_order().len();
        self.focused = self.focused.min(sections.saturating_sub(1));
        let cards = self.layout.cards().len();
        self.selected_card = self.selected_card.min(cards.saturating_sub(1));
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::layout::Theme;
    use crate::layout::storage::memory::MemoryStorage;
    use crate::market::CoinRecord;

    pub fn coin(id: u32, name: &str, symbol: &str) -> CoinRecord {
        CoinRecord {
            id,
            name: Some(name.to_string()),
            symbol: Some(symbol.to_string()),
            high: Some(id as f64 * 20.0),
            low: Some(id as f64 * 10.0),
            price_change: Some(if id % 2 == 0 { -1.5 } else { 2.5 }),
            ..Default::default()
        }
    }

    pub fn market() -> Vec<CoinRecord> {
        vec![
            coin(1, "Bitcoin", "btc"),
            coin(2, "Ethereum", "eth"),
            coin(3, "Tether", "usdt"),
        ]
    }

    /// A dashboard over in-memory storage, exporting into `export_dir`.
    pub fn dashboard(export_dir: PathBuf) -> (DashboardState, MemoryStorage) {
        let storage = MemoryStorage::default();
        let layout = LayoutStore::open(Box::new(storage.clone()), Theme::Light);
        let ui_config = UIConfig::new(false, Duration::from_secs(500), export_dir);
        (
            DashboardState::new(Environment::Production, layout, ui_config),
            storage,
        )
    }

    /// A dashboard that has received one successful fetch.
    pub fn loaded_dashboard(export_dir: PathBuf) -> (DashboardState, MemoryStorage) {
        let (mut state, storage) = dashboard(export_dir);
        state.add_event(WorkerEvent::fetch_started());
        state.add_event(WorkerEvent::fetch_succeeded(market()));
        state.update();
        (state, storage)
    }
}

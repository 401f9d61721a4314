//! Dashboard key handling
//!
//! Keyboard moves stand in for drag and drop: each one is turned into the
//! same `{source, destination?}` result a drag gesture would produce.

use super::state::DashboardState;
use crate::consts::dashboard_consts::storage::EXPORT_FILE_NAME;
use crate::events::EventType;
use crate::layout::{DragResult, LayoutSnapshot, SectionId, SectionStatus};
use crate::logging::LogLevel;
use crate::market::coin::{VISIBLE_FIELDS, filter_records};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;

/// Columns that never scroll out of the table.
pub const PINNED_COLUMNS: usize = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

impl DashboardState {
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }
            return KeyOutcome::Continue;
        }

        if self.search.editing {
            self.handle_search_key(key);
            return KeyOutcome::Continue;
        }

        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            KeyCode::Char('K') => self.move_focused_section(true),
            KeyCode::Char('J') => self.move_focused_section(false),
            KeyCode::Up if shift => self.move_focused_section(true),
            KeyCode::Down if shift => self.move_focused_section(false),
            KeyCode::Up => self.table_scroll = self.table_scroll.saturating_sub(1),
            KeyCode::Down => self.scroll_table_down(),
            KeyCode::Char('x') => self.remove_focused_section(),
            KeyCode::Char(c @ '1'..='3') => self.restore_section(c),
            KeyCode::Char('/') => self.search.editing = true,
            KeyCode::Char('[') => self.column_offset = self.column_offset.saturating_sub(1),
            KeyCode::Char(']') => {
                let scrollable = VISIBLE_FIELDS.len() - PINNED_COLUMNS;
                self.column_offset = (self.column_offset + 1).min(scrollable - 1);
            }
            KeyCode::Char('c') => self.chart_type = self.chart_type.toggled(),
            KeyCode::Char('t') => {
                let theme = self.layout.toggle_theme();
                self.set_status(format!("Theme: {}", theme));
            }
            KeyCode::Left => self.selected_card = self.selected_card.saturating_sub(1),
            KeyCode::Right => self.select_next_card(),
            KeyCode::Char('<') => self.move_selected_card(true),
            KeyCode::Char('>') => self.move_selected_card(false),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected_card(),
            KeyCode::Char('e') => self.export_layout(),
            KeyCode::Char('i') => self.import_layout(),
            KeyCode::Char('R') => self.reset_layout(),
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.search.editing = false,
            KeyCode::Esc => {
                self.search.editing = false;
                self.search.query.clear();
            }
            KeyCode::Backspace => {
                self.search.query.pop();
            }
            KeyCode::Char(c) => self.search.query.push(c),
            _ => {}
        }
        self.table_scroll = 0;
    }

    fn cycle_focus(&mut self, forward: bool) {
        let count = self.layout.section_order().len();
        if count == 0 {
            return;
        }
        let current = self.focused.min(count - 1);
        self.focused = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
    }

    /// Drags the focused section one slot up or down; focus follows it.
    fn move_focused_section(&mut self, up: bool) {
        let count = self.layout.section_order().len();
        if count == 0 {
            return;
        }
        let source = self.focused.min(count - 1);
        let destination = if up {
            source.checked_sub(1)
        } else {
            Some(source + 1).filter(|d| *d < count)
        };
        let drag = DragResult {
            source,
            destination,
        };
        if self.layout.reorder_sections(drag) {
            if let Some(destination) = destination {
                self.focused = destination;
            }
        }
    }

    fn remove_focused_section(&mut self) {
        if let Some(id) = self.focused_section() {
            self.layout.remove_section(id);
            self.clamp_cursors();
        }
    }

    fn restore_section(&mut self, key: char) {
        let index = key as usize - '1' as usize;
        let Some(&id) = SectionId::ALL.get(index) else {
            return;
        };
        if self.layout.status(id) == SectionStatus::Active {
            self.set_status(format!("Section {} is already shown", id));
            return;
        }
        if self.layout.restore_section(id) {
            self.focused = self.layout.section_order().len() - 1;
        }
    }

    fn scroll_table_down(&mut self) {
        let rows = filter_records(self.feed.coins(), &self.search.query).len();
        if self.table_scroll + 1 < rows {
            self.table_scroll += 1;
        }
    }

    fn select_next_card(&mut self) {
        if self.selected_card + 1 < self.layout.cards().len() {
            self.selected_card += 1;
        }
    }

    /// Drags the selected card one place left or right; the selection follows it.
    fn move_selected_card(&mut self, left: bool) {
        let count = self.layout.cards().len();
        if count == 0 {
            return;
        }
        let source = self.selected_card.min(count - 1);
        let destination = if left {
            source.checked_sub(1)
        } else {
            Some(source + 1).filter(|d| *d < count)
        };
        match self.layout.reorder_cards(DragResult {
            source,
            destination,
        }) {
            Ok(true) => {
                if let Some(destination) = destination {
                    self.selected_card = destination;
                }
            }
            Ok(false) => {}
            Err(e) => self.report_layout_error(e),
        }
    }

    fn remove_selected_card(&mut self) {
        let Some(card) = self.layout.cards().get(self.selected_card) else {
            return;
        };
        let (id, name) = (card.id, card.display_name().to_string());
        match self.layout.remove_card(id) {
            Ok(true) => {
                self.set_status(format!("Removed card {}", name));
                self.clamp_cursors();
            }
            Ok(false) => {}
            Err(e) => self.report_layout_error(e),
        }
    }

    fn export_layout(&mut self) {
        let path = self.export_dir.join(EXPORT_FILE_NAME);
        match self.layout.export_layout().write_to(&path) {
            Ok(()) => {
                let msg = format!("Layout exported to {}", path.display());
                self.record_layout_event(msg.clone(), EventType::Success, LogLevel::Info);
                self.set_status(msg);
            }
            Err(e) => {
                warn!("Export failed: {}", e);
                self.alert = Some(format!("Export failed: {}", e));
            }
        }
    }

    fn import_layout(&mut self) {
        let path = self.export_dir.join(EXPORT_FILE_NAME);
        let result = LayoutSnapshot::read_from(&path)
            .and_then(|snapshot| self.layout.import_layout(snapshot));
        match result {
            Ok(()) => {
                self.focused = 0;
                self.selected_card = 0;
                let msg = format!("Layout imported from {}", path.display());
                self.record_layout_event(msg.clone(), EventType::Success, LogLevel::Info);
                self.set_status(msg);
            }
            Err(e) => {
                warn!("Import of {} rejected: {}", path.display(), e);
                self.record_layout_event(
                    format!("Import failed: {}", e),
                    EventType::Error,
                    LogLevel::Warn,
                );
                self.alert = Some(format!("Invalid layout file: {}", e));
            }
        }
    }

    /// Forgets the saved card layout and reseeds from the latest records.
    fn reset_layout(&mut self) {
        if let Err(e) = self.layout.clear_persisted() {
            self.report_layout_error(e);
            return;
        }
        self.selected_card = 0;
        match self.layout.sync_with_market(self.feed.coins()) {
            Ok(_) => self.set_status("Card layout reset".to_string()),
            Err(e) => self.report_layout_error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::state::ChartType;
    use super::super::state::test_support::{dashboard, loaded_dashboard};
    use super::*;
    use crate::layout::Theme;
    use std::fs;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(state: &mut DashboardState, codes: &[KeyCode]) {
        for code in codes {
            assert_eq!(state.handle_key(key(*code)), KeyOutcome::Continue);
        }
    }

    fn card_names(state: &DashboardState) -> Vec<String> {
        state
            .layout
            .cards()
            .iter()
            .map(|c| c.display_name().to_string())
            .collect()
    }

    #[test]
    fn quit_keys() {
        let dir = tempdir().unwrap();
        let (mut state, _) = dashboard(dir.path().to_path_buf());
        assert_eq!(state.handle_key(key(KeyCode::Char('q'))), KeyOutcome::Quit);
        assert_eq!(state.handle_key(key(KeyCode::Esc)), KeyOutcome::Quit);
    }

    #[test]
    fn move_section_down_and_back() {
        let dir = tempdir().unwrap();
        let (mut state, _) = dashboard(dir.path().to_path_buf());

        press(&mut state, &[KeyCode::Char('J')]);
        assert_eq!(
            state.layout.section_order(),
            vec![SectionId::Graph, SectionId::Table, SectionId::Cards]
        );
        assert_eq!(state.focused_section(), Some(SectionId::Table));

        state.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT));
        assert_eq!(
            state.layout.section_order(),
            vec![SectionId::Table, SectionId::Graph, SectionId::Cards]
        );
    }

    #[test]
    fn moving_past_the_edge_is_a_cancelled_drag() {
        let dir = tempdir().unwrap();
        let (mut state, _) = dashboard(dir.path().to_path_buf());
        let before = state.layout.state();

        press(&mut state, &[KeyCode::Char('K')]);
        press(&mut state, &[KeyCode::BackTab, KeyCode::Char('J')]);

        assert_eq!(state.layout.state(), before);
    }

    #[test]
    fn remove_and_restore_section_by_key() {
        let dir = tempdir().unwrap();
        let (mut state, _) = dashboard(dir.path().to_path_buf());

        press(&mut state, &[KeyCode::Tab, KeyCode::Char('x')]);
        assert_eq!(
            state.layout.section_order(),
            vec![SectionId::Table, SectionId::Cards]
        );

        press(&mut state, &[KeyCode::Char('2')]);
        assert_eq!(
            state.layout.section_order(),
            vec![SectionId::Table, SectionId::Cards, SectionId::Graph]
        );
        assert_eq!(state.focused_section(), Some(SectionId::Graph));

        press(&mut state, &[KeyCode::Char('1')]);
        assert_eq!(
            state.status_line.as_deref(),
            Some("Section table is already shown")
        );
    }

    #[test]
    fn search_captures_keystrokes() {
        let dir = tempdir().unwrap();
        let (mut state, _) = loaded_dashboard(dir.path().to_path_buf());

        press(
            &mut state,
            &[
                KeyCode::Char('/'),
                KeyCode::Char('q'),
                KeyCode::Backspace,
                KeyCode::Char('B'),
                KeyCode::Char('i'),
                KeyCode::Char('t'),
                KeyCode::Enter,
            ],
        );

        assert_eq!(state.search.query, "Bit");
        assert!(!state.search.editing);
        assert_eq!(filter_records(state.feed.coins(), &state.search.query).len(), 1);
        // 't' went to the query, not the theme
        assert_eq!(state.layout.theme(), Theme::Light);
    }

    #[test]
    fn chart_and_theme_toggles() {
        let dir = tempdir().unwrap();
        let (mut state, _) = loaded_dashboard(dir.path().to_path_buf());
        let cards = state.layout.cards().to_vec();

        press(&mut state, &[KeyCode::Char('c'), KeyCode::Char('t')]);

        assert_eq!(state.chart_type, ChartType::Bar);
        assert_eq!(state.layout.theme(), Theme::Dark);
        assert_eq!(state.layout.cards(), cards.as_slice());
    }

    #[test]
    fn move_and_delete_cards() {
        let dir = tempdir().unwrap();
        let (mut state, storage) = loaded_dashboard(dir.path().to_path_buf());

        press(&mut state, &[KeyCode::Char('>')]);
        assert_eq!(card_names(&state), vec!["Ethereum", "Bitcoin", "Tether"]);
        assert_eq!(state.selected_card, 1);

        press(&mut state, &[KeyCode::Char('d')]);
        assert_eq!(card_names(&state), vec!["Ethereum", "Tether"]);
        let ids: Vec<u32> = state.layout.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(
            storage.cards.lock().unwrap().as_ref().unwrap().len(),
            2
        );

        press(&mut state, &[KeyCode::Right, KeyCode::Right, KeyCode::Delete]);
        assert_eq!(card_names(&state), vec!["Ethereum"]);
        assert_eq!(state.selected_card, 0);
    }

    #[test]
    fn export_then_import_restores_layout() {
        let dir = tempdir().unwrap();
        let (mut state, _) = loaded_dashboard(dir.path().to_path_buf());
        press(&mut state, &[KeyCode::Char('x'), KeyCode::Char('t')]);
        let exported = state.layout.state();

        press(&mut state, &[KeyCode::Char('e')]);
        assert!(dir.path().join(EXPORT_FILE_NAME).exists());

        press(&mut state, &[KeyCode::Char('1'), KeyCode::Char('d'), KeyCode::Char('t')]);
        assert_ne!(state.layout.state(), exported);

        press(&mut state, &[KeyCode::Char('i')]);
        assert_eq!(state.layout.state(), exported);
        assert!(state.alert.is_none());
    }

    #[test]
    fn malformed_import_raises_alert_and_keeps_state() {
        let dir = tempdir().unwrap();
        let (mut state, _) = loaded_dashboard(dir.path().to_path_buf());
        fs::write(
            dir.path().join(EXPORT_FILE_NAME),
            r#"{"sections": [], "components": []}"#,
        )
        .unwrap();
        let before = state.layout.state();

        press(&mut state, &[KeyCode::Char('i')]);

        assert_eq!(state.layout.state(), before);
        assert!(state.alert.as_deref().unwrap().contains("theme"));

        // Other keys are swallowed until the alert is dismissed
        press(&mut state, &[KeyCode::Char('t'), KeyCode::Char('q')]);
        assert_eq!(state.layout.theme(), Theme::Light);
        press(&mut state, &[KeyCode::Enter]);
        assert!(state.alert.is_none());
    }

    #[test]
    fn reset_reseeds_from_latest_data() {
        let dir = tempdir().unwrap();
        let (mut state, _) = loaded_dashboard(dir.path().to_path_buf());
        press(&mut state, &[KeyCode::Char('d'), KeyCode::Char('d')]);
        assert_eq!(state.layout.cards().len(), 1);

        press(&mut state, &[KeyCode::Char('R')]);

        assert_eq!(card_names(&state), vec!["Bitcoin", "Ethereum", "Tether"]);
    }

    #[test]
    fn column_scroll_is_bounded() {
        let dir = tempdir().unwrap();
        let (mut state, _) = dashboard(dir.path().to_path_buf());

        press(&mut state, &[KeyCode::Char('[')]);
        assert_eq!(state.column_offset, 0);
        for _ in 0..40 {
            press(&mut state, &[KeyCode::Char(']')]);
        }
        assert_eq!(state.column_offset, VISIBLE_FIELDS.len() - PINNED_COLUMNS - 1);
    }
}

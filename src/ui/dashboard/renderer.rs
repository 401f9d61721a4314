//! Dashboard main renderer

use super::components::{alert, cards, chart, footer, header, logs, table};
use super::state::DashboardState;
use super::utils::{Palette, centered_rect, clean_http_error_message};
use crate::layout::SectionId;
use crate::market::FetchStatus;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Wrap};

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    let palette = Palette::for_theme(state.layout.theme());
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(palette.background)),
            f.area(),
        );
    }

    match state.feed.status() {
        FetchStatus::Failed => render_full_page(
            f,
            &clean_http_error_message(&format!(
                "Failed to load data: {}",
                state.feed.error().unwrap_or("unknown error")
            )),
            &palette,
            true,
        ),
        // Only until the first records arrive; later refreshes keep the dashboard up
        FetchStatus::Idle | FetchStatus::Loading if state.feed.coins().is_empty() => {
            render_full_page(f, "Loading...", &palette, false)
        }
        _ => render_sections(f, state),
    }

    if let Some(message) = &state.alert {
        alert::render_alert(f, f.area(), message, state.layout.theme());
    }
}

fn render_full_page(f: &mut Frame, message: &str, palette: &Palette, failed: bool) {
    let color = if failed { palette.negative } else { palette.accent };
    let hint = if failed {
        "Retrying at the next scheduled refresh. [Q] Quit"
    } else {
        "[Q] Quit"
    };
    let page = Paragraph::new(vec![Line::from(message), Line::from(""), Line::from(hint)])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    f.render_widget(page, centered_rect(80, 7, f.area()));
}

fn render_sections(f: &mut Frame, state: &DashboardState) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    let sections = state.layout.sections();
    if sections.is_empty() {
        let palette = Palette::for_theme(state.layout.theme());
        f.render_widget(
            Paragraph::new("All sections removed. Press [1] [2] [3] to restore.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(palette.muted)),
            main_chunks[1],
        );
    } else {
        let section_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Fill(1); sections.len()])
            .split(main_chunks[1]);
        let focused = state.focused_section();
        for (section, area) in sections.iter().zip(section_chunks.iter()) {
            let is_focused = focused == Some(section.id);
            render_section(f, *area, state, section.id, &section.title, is_focused);
        }
    }

    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3], state);
}

fn render_section(
    f: &mut Frame,
    area: Rect,
    state: &DashboardState,
    id: SectionId,
    title: &str,
    focused: bool,
) {
    match id {
        SectionId::Table => table::render_table(f, area, state, title, focused),
        SectionId::Graph => chart::render_chart(f, area, state, title, focused),
        SectionId::Cards => cards::render_cards(f, area, state, title, focused),
    }
}

#[cfg(test)]
mod tests {
    use super::super::state::test_support::{dashboard, loaded_dashboard};
    use super::*;
    use crate::events::Event as WorkerEvent;
    use crate::logging::LogLevel;
    use ratatui::{Terminal, backend::TestBackend};
    use tempfile::tempdir;

    fn screen_text(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 60)).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn loading_page_before_first_data() {
        let dir = tempdir().unwrap();
        let (mut state, _) = dashboard(dir.path().to_path_buf());
        state.add_event(WorkerEvent::fetch_started());
        state.update();

        assert!(screen_text(&state).contains("Loading..."));
    }

    #[test]
    fn error_page_shows_message() {
        let dir = tempdir().unwrap();
        let (mut state, _) = dashboard(dir.path().to_path_buf());
        state.add_event(WorkerEvent::fetch_failed(
            "connection refused".to_string(),
            LogLevel::Warn,
        ));
        state.update();

        assert!(screen_text(&state).contains("Failed to load data: connection refused"));
    }

    #[test]
    fn rate_limited_page_keeps_status_and_body() {
        let dir = tempdir().unwrap();
        let (mut state, _) = dashboard(dir.path().to_path_buf());
        state.add_event(WorkerEvent::fetch_failed(
            r#"HTTP error with status 429: {"status":{"error_code":429,"error_message":"You've exceeded the Rate Limit"}}"#
                .to_string(),
            LogLevel::Debug,
        ));
        state.update();

        let screen = screen_text(&state);
        assert!(screen.contains("Failed to load data: HTTP error with status 429"));
        assert!(screen.contains("exceeded"));
        assert!(screen.contains("limited"));
    }

    #[test]
    fn sections_render_in_layout_order() {
        let dir = tempdir().unwrap();
        let (mut state, _) = loaded_dashboard(dir.path().to_path_buf());
        state.layout.remove_section(SectionId::Graph);
        state
            .layout
            .reorder_sections(crate::layout::DragResult::new(1, 0));

        let text = screen_text(&state);
        let cards = text.find("CRYPTO CARD DATA").unwrap();
        let table = text.find("CRYPTO DATA TABLE").unwrap();
        assert!(cards < table);
        assert!(!text.contains("CRYPTO GRAPH REPRESENTATION"));
        assert!(text.contains("Avg Market Cap: $15.00"));
    }

    #[test]
    fn alert_overlays_dashboard() {
        let dir = tempdir().unwrap();
        let (mut state, _) = loaded_dashboard(dir.path().to_path_buf());
        state.alert = Some("Invalid layout file".to_string());

        let text = screen_text(&state);
        assert!(text.contains("ALERT"));
        assert!(text.contains("Invalid layout file"));
    }
}

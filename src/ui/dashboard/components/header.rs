//! Dashboard header component
//!
//! Renders the title and the refresh countdown gauge

use super::super::state::DashboardState;
use super::super::utils::Palette;
use crate::market::FetchStatus;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and refresh progress.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let palette = Palette::for_theme(state.layout.theme());
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title_text = format!(
        "CRYPTO DASHBOARD v{} | {}",
        env!("CARGO_PKG_VERSION"),
        state.environment
    );
    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let (progress_text, gauge_color, progress_percent) = match state.feed.status() {
        FetchStatus::Loading => {
            // Animated while a request is in flight
            let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
            ("LOADING - Fetching market data".to_string(), palette.highlight, progress)
        }
        FetchStatus::Failed => (
            "FAILED - Retrying at next refresh".to_string(),
            palette.negative,
            state.refresh_progress(),
        ),
        FetchStatus::Idle | FetchStatus::Succeeded => {
            let label = match state.time_until_refresh() {
                Some(remaining) => format!("NEXT REFRESH IN {}s", remaining.as_secs()),
                None => "WAITING - First refresh pending".to_string(),
            };
            (label, palette.positive, state.refresh_progress())
        }
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(palette.muted)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent.min(100))
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}

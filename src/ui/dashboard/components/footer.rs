//! Dashboard footer component
//!
//! Renders key hints, the last status message and the removed sections

use super::super::state::DashboardState;
use super::super::utils::Palette;
use crate::layout::SectionId;

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

const KEY_HINTS: &str = "[Q] Quit [Tab] Focus [J/K] Move [X] Remove [/] Search [C] Chart \
[T] Theme [</>] Move card [D] Delete [E] Export [I] Import [R] Reset";

/// Render footer.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let palette = Palette::for_theme(state.layout.theme());

    let mut spans = Vec::new();
    let removed = state.layout.removed_sections();
    if !removed.is_empty() {
        let restore: Vec<String> = removed
            .iter()
            .map(|s| format!("[{}] {}", restore_key(s.id), s.title))
            .collect();
        spans.push(Span::styled(
            format!("Restore: {} | ", restore.join(" ")),
            Style::default().fg(palette.highlight),
        ));
    }
    match &state.status_line {
        Some(status) => spans.push(Span::styled(
            status.clone(),
            Style::default().fg(palette.text),
        )),
        None => spans.push(Span::styled(
            KEY_HINTS,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
    }

    let footer = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}

/// Digit key that restores `id`.
fn restore_key(id: SectionId) -> usize {
    id.index() + 1
}

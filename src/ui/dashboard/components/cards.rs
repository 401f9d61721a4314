//! Coin cards component
//!
//! A grid of summary cards in layout order, with a selection cursor

use super::super::state::DashboardState;
use super::super::utils::Palette;
use crate::market::CoinRecord;
use crate::market::coin::format_usd;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

const CARD_WIDTH: u16 = 28;
const CARD_HEIGHT: u16 = 5;

/// Cards per row and the first row to draw so the selection stays visible.
fn grid_window(inner: Rect, selected: usize) -> (usize, usize, usize) {
    let per_row = (inner.width / CARD_WIDTH).max(1) as usize;
    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = selected / per_row;
    let first_row = selected_row.saturating_sub(visible_rows - 1);
    (per_row, visible_rows, first_row)
}

pub fn render_cards(f: &mut Frame, area: Rect, state: &DashboardState, title: &str, focused: bool) {
    let palette = Palette::for_theme(state.layout.theme());
    let cards = state.layout.cards();
    let block = Block::default()
        .title(Line::from(Span::styled(
            format!(" {} ", title.to_uppercase()),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .title_bottom(Line::from(format!(" {} cards ", cards.len())))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused {
            palette.highlight
        } else {
            palette.accent
        }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if cards.is_empty() {
        f.render_widget(Paragraph::new("No cards. Press [R] to rebuild from market data."), inner);
        return;
    }

    let (per_row, visible_rows, first_row) = grid_window(inner, state.selected_card);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(inner);

    for (row_index, row_area) in rows.iter().enumerate() {
        let start = (first_row + row_index) * per_row;
        if start >= cards.len() {
            break;
        }
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CARD_WIDTH); per_row])
            .split(*row_area);
        for (column, card) in cards[start..].iter().take(per_row).enumerate() {
            let selected = start + column == state.selected_card;
            render_card(f, columns[column], card, selected, &palette);
        }
    }
}

fn render_card(f: &mut Frame, area: Rect, card: &CoinRecord, selected: bool, palette: &Palette) {
    let border = if selected {
        Style::default()
            .fg(palette.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };
    let lines = vec![
        Line::from(format!("Highest Price: {}", format_usd(card.high))),
        Line::from(format!("Lowest Price: {}", format_usd(card.low))),
        Line::from(format!("Avg Market Cap: {}", format_usd(card.average_price()))),
    ];
    let widget = Paragraph::new(lines)
        .style(Style::default().fg(palette.text))
        .block(
            Block::default()
                .title(format!("#{} {}", card.id, card.display_name()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border),
        );
    f.render_widget(widget, area);
}

//! Market table component
//!
//! One column per visible field, filtered by the search query

use super::super::input::PINNED_COLUMNS;
use super::super::state::DashboardState;
use super::super::utils::Palette;
use crate::market::coin::{SIGNED_FIELDS, VISIBLE_FIELDS, filter_records};

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

const PINNED_WIDTHS: [u16; PINNED_COLUMNS] = [4, 14];
const COLUMN_WIDTH: u16 = 16;

/// Indices of the columns to draw: the pinned ones, then the scrolled window.
fn visible_columns(column_offset: usize) -> Vec<usize> {
    (0..PINNED_COLUMNS)
        .chain((PINNED_COLUMNS + column_offset)..VISIBLE_FIELDS.len())
        .collect()
}

pub fn render_table(
    f: &mut Frame,
    area: Rect,
    state: &DashboardState,
    title: &str,
    focused: bool,
) {
    let palette = Palette::for_theme(state.layout.theme());
    let columns = visible_columns(state.column_offset);
    let rows = filter_records(state.feed.coins(), &state.search.query);
    let matched = rows.len();

    let header = Row::new(columns.iter().map(|&i| {
        Cell::from(VISIBLE_FIELDS[i]).style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let body = rows.into_iter().skip(state.table_scroll).map(|record| {
        let values = record.field_values();
        Row::new(columns.iter().map(|&i| {
            let text = values[i].clone().unwrap_or_else(|| "-".to_string());
            let color = if SIGNED_FIELDS.contains(&VISIBLE_FIELDS[i]) {
                text.parse::<f64>()
                    .map(|v| palette.sign_color(v))
                    .unwrap_or(palette.text)
            } else {
                palette.text
            };
            Cell::from(text).style(Style::default().fg(color))
        }))
    });

    let widths = columns.iter().map(|&i| match i {
        i if i < PINNED_COLUMNS => Constraint::Length(PINNED_WIDTHS[i]),
        _ => Constraint::Length(COLUMN_WIDTH),
    });

    let search = if state.search.editing {
        format!(" Search: {}_ ", state.search.query)
    } else if state.search.query.is_empty() {
        " [/] Search ".to_string()
    } else {
        format!(" Search: {} ({} rows) ", state.search.query, matched)
    };

    let block = Block::default()
        .title(Line::from(Span::styled(
            format!(" {} ", title.to_uppercase()),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .title_bottom(Line::from(search))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused {
            palette.highlight
        } else {
            palette.accent
        }));

    let table = Table::new(body, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    f.render_widget(table, area);
}

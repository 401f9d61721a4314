//! Price change chart component
//!
//! Plots `Price Change` per coin as a line or as bars

use super::super::state::{ChartType, DashboardState};
use super::super::utils::Palette;
use crate::market::CoinRecord;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Chart, Dataset, GraphType,
    Paragraph,
};

const BAR_WIDTH: u16 = 5;
const BAR_GAP: u16 = 1;

/// `(position, price change)` for every coin with a known change.
fn price_change_points(coins: &[CoinRecord]) -> Vec<(f64, f64)> {
    coins
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.price_change.map(|v| (i as f64, v)))
        .collect()
}

/// Y-axis bounds padded so a flat series still has height.
fn value_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let (min, max) = points
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    if points.is_empty() {
        return [-1.0, 1.0];
    }
    let pad = ((max - min) * 0.1).max(1.0);
    [min.min(0.0) - pad, max.max(0.0) + pad]
}

pub fn render_chart(f: &mut Frame, area: Rect, state: &DashboardState, title: &str, focused: bool) {
    let palette = Palette::for_theme(state.layout.theme());
    let block = Block::default()
        .title(Line::from(Span::styled(
            format!(" {} ", title.to_uppercase()),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .title_bottom(Line::from(format!(" [C] {} chart ", state.chart_type)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused {
            palette.highlight
        } else {
            palette.accent
        }));

    let coins = state.feed.coins();
    if coins.is_empty() {
        f.render_widget(Paragraph::new("No market data yet").block(block), area);
        return;
    }

    match state.chart_type {
        ChartType::Line => render_line(f, area, coins, block, &palette),
        ChartType::Bar => render_bars(f, area, coins, block, &palette),
    }
}

fn render_line(f: &mut Frame, area: Rect, coins: &[CoinRecord], block: Block, palette: &Palette) {
    let points = price_change_points(coins);
    let [y_min, y_max] = value_bounds(&points);
    let last = coins.len().saturating_sub(1);

    let dataset = Dataset::default()
        .name("Price Change")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(palette.accent))
        .data(&points);

    let x_labels = [0, last / 2, last]
        .into_iter()
        .map(|i| coins[i].display_name().to_string())
        .collect::<Vec<_>>();
    let y_labels = vec![
        format!("{:.2}", y_min),
        "0".to_string(),
        format!("{:.2}", y_max),
    ];

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title("Name")
                .style(Style::default().fg(palette.muted))
                .bounds([0.0, last.max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Price Change")
                .style(Style::default().fg(palette.muted))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

fn render_bars(f: &mut Frame, area: Rect, coins: &[CoinRecord], block: Block, palette: &Palette) {
    // Bars only grow upwards: height is the magnitude, colour and label carry the sign
    let fits = (area.width.saturating_sub(2) / (BAR_WIDTH + BAR_GAP)).max(1) as usize;
    let bars: Vec<Bar> = coins
        .iter()
        .take(fits)
        .map(|coin| {
            let change = coin.price_change.unwrap_or(0.0);
            let label = coin
                .symbol
                .as_deref()
                .unwrap_or_else(|| coin.display_name())
                .to_uppercase();
            Bar::default()
                .value((change.abs() * 100.0).round() as u64)
                .text_value(format!("{:.1}", change))
                .label(Line::from(label))
                .style(Style::default().fg(palette.sign_color(change)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .value_style(Style::default().fg(palette.text))
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}

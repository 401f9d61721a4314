//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use crate::layout::Theme;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Color;

/// Colours for one theme.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub accent: Color,
    pub muted: Color,
    pub highlight: Color,
    pub positive: Color,
    pub negative: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::Rgb(245, 245, 245),
                text: Color::Black,
                accent: Color::Blue,
                muted: Color::Gray,
                highlight: Color::Magenta,
                positive: Color::Green,
                negative: Color::Red,
            },
            Theme::Dark => Self {
                background: Color::Rgb(16, 20, 24),
                text: Color::White,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                highlight: Color::LightYellow,
                positive: Color::LightGreen,
                negative: Color::LightRed,
            },
        }
    }

    /// Green for gains, red for losses, plain text otherwise.
    pub fn sign_color(&self, value: f64) -> Color {
        if value > 0.0 {
            self.positive
        } else if value < 0.0 {
            self.negative
        } else {
            self.text
        }
    }
}

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::Scheduler => Color::Cyan,
        Worker::Fetcher => Color::Yellow,
        Worker::Layout => Color::Green,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("Reqwest error") && msg.contains("timed out") {
        return msg.replace("Reqwest error", "Request timed out");
    }
    if msg.contains("HTTP error with status 429") {
        return format!("{} (rate limited by the market API, retrying on the next refresh)", msg);
    }
    msg.to_string()
}

/// A `width` x `height` rectangle centred in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width.min(area.width)),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}

//! Blocking alert popup

use super::super::utils::{Palette, centered_rect};
use crate::layout::Theme;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

pub fn render_alert(f: &mut Frame, area: Rect, message: &str, theme: Theme) {
    let palette = Palette::for_theme(theme);
    let popup = centered_rect(60, 9, area);

    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from("[Enter] OK").alignment(Alignment::Center),
    ];
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(palette.text).bg(palette.background))
        .block(
            Block::default()
                .title(" ALERT ")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(
                    Style::default()
                        .fg(palette.negative)
                        .add_modifier(Modifier::BOLD),
                )
                .padding(Padding::horizontal(1)),
        );

    f.render_widget(Clear, popup);
    f.render_widget(widget, popup);
}

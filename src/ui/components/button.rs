//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Width the submit button occupies, borders included
const BUTTON_WIDTH: u16 = 20;

/// Render a centered, bordered button
///
/// A disabled button keeps its label but is drawn dimmed and never highlighted.
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let highlighted = is_selected && is_enabled;

    let border_style = if highlighted {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if highlighted {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let width = BUTTON_WIDTH.min(area.width);
    let button_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: BUTTON_HEIGHT.min(area.height),
    };

    let paragraph = Paragraph::new(format!(" {label} "))
        .alignment(Alignment::Center)
        .style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), button_area);
}

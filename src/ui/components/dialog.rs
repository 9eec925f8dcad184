//! Error dialog overlay

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

const MAX_WIDTH: u16 = 60;
/// Border plus one column of padding on each side
const HORIZONTAL_CHROME: u16 = 4;

/// Render the front error of the queue, centered on the screen
pub fn render_error_dialog(frame: &mut Frame, message: &str, queued: usize) {
    let area = frame.area();
    let max_line_width = MAX_WIDTH.min(area.width).saturating_sub(HORIZONTAL_CHROME) as usize;

    let title = if queued > 1 {
        format!(" Error (1 of {queued}) ")
    } else {
        " Error ".to_string()
    };

    let wrapped = wrap_text(message, max_line_width.max(1));
    let content_width = wrapped
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.chars().count()) as u16;

    // message + blank + hint, inside the borders
    let height = (wrapped.len() as u16 + 4).min(area.height);
    let width = (content_width + HORIZONTAL_CHROME).min(MAX_WIDTH).min(area.width);

    let dialog_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, dialog_area);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = wrapped.into_iter().map(Line::from).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", key_style),
        Span::raw(" or "),
        Span::styled("Esc", key_style),
        Span::raw(" to dismiss"),
    ]));

    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black));

    let dialog = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, dialog_area);
}

/// Greedy word wrap, counting characters rather than bytes
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.chars().count();
            if current_width > 0 && current_width + 1 + word_width > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
        lines.push(current);
    }

    lines
}

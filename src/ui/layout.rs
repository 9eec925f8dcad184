//! Layout components (form area, status bar)

use crate::app::App;
use crate::platform::{COPY_ID_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const QUIT_HINT: &str = " ^C:quit ";

/// Split the screen into the form area and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Form
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    if app.is_submitting() {
        spans.push(Span::styled(" ● ", Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            "Sending…",
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::styled(" ○ ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            key_hints(app),
            Style::default().fg(Color::Gray),
        ));
    }

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_width = QUIT_HINT.len() as u16;
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_width),
        y: area.y,
        width: quit_width.min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(QUIT_HINT).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the focused field
fn key_hints(app: &App) -> String {
    let field = app.state.active_field;
    let mut hints = String::from("Tab:next");
    if field.is_choice() {
        hints.push_str("  ←/→:choose");
    }
    if field == crate::state::FieldId::CertificateFile {
        hints.push_str("  Enter:load file");
    }
    hints.push_str(&format!("  {SUBMIT_SHORTCUT}:submit"));
    if app.state.last_submission_id.is_some() {
        hints.push_str(&format!("  {COPY_ID_SHORTCUT}:copy ID"));
    }
    hints
}

//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Visual state shared by every field
#[derive(Debug, Clone, Copy)]
pub struct FieldLook {
    pub is_active: bool,
    pub is_enabled: bool,
}

impl FieldLook {
    fn accent(&self) -> Style {
        if self.is_active && self.is_enabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn block(&self, label: &str) -> Block<'static> {
        Block::default()
            .title(format!(" {label} "))
            .borders(Borders::ALL)
            .border_style(self.accent())
    }

    fn show_cursor(&self) -> bool {
        self.is_active && self.is_enabled
    }
}

fn placeholder_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

/// Draw a single-line text field with an optional dim detail line below it
pub fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    detail: Option<Line<'_>>,
    look: FieldLook,
) {
    let mut first = if value.is_empty() && !look.show_cursor() {
        vec![Span::styled("(empty)", placeholder_style())]
    } else {
        vec![Span::raw(value.to_string())]
    };
    if look.show_cursor() {
        first.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let mut lines = vec![Line::from(first)];
    lines.extend(detail);

    frame.render_widget(Paragraph::new(lines).block(look.block(label)), area);
}

/// Draw a choice field as `◀ value ▶`, or a placeholder when nothing is chosen
pub fn draw_choice_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: Option<&str>,
    placeholder: &str,
    look: FieldLook,
) {
    let arrow_style = look.accent();
    let body = match value {
        Some(value) => Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(placeholder.to_string(), placeholder_style()),
    };

    let line = if look.is_enabled {
        Line::from(vec![
            Span::styled("◀ ", arrow_style),
            body,
            Span::styled(" ▶", arrow_style),
        ])
    } else {
        Line::from(body)
    };

    frame.render_widget(Paragraph::new(line).block(look.block(label)), area);
}

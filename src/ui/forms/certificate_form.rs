//! Certificate intake form rendering

use super::field_renderer::{draw_choice_field, draw_text_field, FieldLook};
use crate::app::App;
use crate::state::{CertificateFile, FieldId};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;
/// File field carries a second line describing the loaded file
const FILE_FIELD_HEIGHT: u16 = 4;

fn row_height(field: FieldId) -> u16 {
    match field {
        FieldId::CertificateFile => FILE_FIELD_HEIGHT,
        FieldId::Submit => BUTTON_HEIGHT,
        _ => FIELD_HEIGHT,
    }
}

/// Draw the intake form with every visible field in tab order
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Graduation Certificate ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = &app.state;
    let visible: Vec<FieldId> = FieldId::ORDER
        .into_iter()
        .filter(|field| state.is_field_visible(*field))
        .collect();

    let mut constraints: Vec<Constraint> = visible
        .iter()
        .map(|field| Constraint::Length(row_height(*field)))
        .collect();
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    for (field, row) in visible.iter().zip(rows.iter()) {
        draw_row(frame, *row, app, *field);
    }
}

fn draw_row(frame: &mut Frame, area: Rect, app: &App, field: FieldId) {
    let state = &app.state;
    let fields = &state.form.fields;
    let locked = app.is_submitting();
    let look = FieldLook {
        is_active: state.active_field == field,
        is_enabled: !locked,
    };

    match field {
        FieldId::FullName => draw_text_field(
            frame,
            area,
            field.label(),
            state.name_input.as_str(),
            None,
            look,
        ),
        FieldId::Stage => draw_choice_field(
            frame,
            area,
            field.label(),
            fields.stage.map(|s| s.label()),
            "Choose a stage",
            look,
        ),
        FieldId::Grade => draw_choice_field(
            frame,
            area,
            field.label(),
            fields.grade.map(|g| g.label()),
            "Choose a grade",
            look,
        ),
        FieldId::CertificateType => {
            let has_stage = fields.stage.is_some();
            draw_choice_field(
                frame,
                area,
                field.label(),
                fields.certificate_type.map(|t| t.label()),
                if has_stage {
                    "Choose a certificate type"
                } else {
                    "Choose a stage first"
                },
                FieldLook {
                    is_enabled: look.is_enabled && has_stage,
                    ..look
                },
            )
        }
        FieldId::GraduationYear => draw_text_field(
            frame,
            area,
            field.label(),
            state.year_input.as_str(),
            None,
            look,
        ),
        FieldId::CertificateFile => draw_text_field(
            frame,
            area,
            field.label(),
            state.file_path_input.as_str(),
            Some(file_summary(fields.file.as_ref())),
            look,
        ),
        FieldId::Submit => {
            let label = if locked { "Sending…" } else { "Submit" };
            render_button(frame, area, label, look.is_active, !locked);
        }
    }
}

/// One-line description of the loaded file
fn file_summary(file: Option<&CertificateFile>) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    match file {
        Some(file) => Line::from(vec![
            Span::styled("✔ ", Style::default().fg(Color::Green)),
            Span::styled(
                format!(
                    "{} · {} · {}",
                    file.file_name,
                    file.content_type.essence_str(),
                    human_size(file.size())
                ),
                dim,
            ),
        ]),
        None => Line::from(Span::styled("No file loaded (Enter to load)", dim)),
    }
}

fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

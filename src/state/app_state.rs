//! Application state for the intake screen

use super::catalog::{CertificateType, Grade, Stage};
use super::forms::{resolver, FieldId, FormEvent, FormState, InputFilter, TextInput};
use std::collections::VecDeque;

/// Longest full name the input accepts
pub const MAX_NAME_CHARS: usize = 60;

/// Main application state
pub struct AppState {
    pub form: FormState,
    pub active_field: FieldId,

    // Text buffers backing the typed fields
    pub name_input: TextInput,
    pub year_input: TextInput,
    pub file_path_input: TextInput,

    /// Errors waiting to be shown, oldest first
    pub errors: VecDeque<String>,
    /// Transient confirmation shown in the status bar
    pub status_message: Option<String>,
    /// Identifier of the last accepted submission
    pub last_submission_id: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            form: FormState::new(),
            active_field: FieldId::default(),
            name_input: TextInput::new().with_max_chars(MAX_NAME_CHARS),
            year_input: TextInput::new().with_filter(InputFilter::Digits),
            file_path_input: TextInput::new(),
            errors: VecDeque::new(),
            status_message: None,
            last_submission_id: None,
        }
    }
}

impl AppState {
    /// Whether a field is currently shown on the form
    pub fn is_field_visible(&self, field: FieldId) -> bool {
        match field {
            FieldId::Grade => self.form.fields.grade_applicable(),
            _ => true,
        }
    }

    /// Move to next visible field
    pub fn next_field(&mut self) {
        let mut field = self.active_field.next();
        while !self.is_field_visible(field) {
            field = field.next();
        }
        self.active_field = field;
    }

    /// Move to previous visible field
    pub fn prev_field(&mut self) {
        let mut field = self.active_field.prev();
        while !self.is_field_visible(field) {
            field = field.prev();
        }
        self.active_field = field;
    }

    /// Keep focus off a field that just became hidden
    fn ensure_active_visible(&mut self) {
        if !self.is_field_visible(self.active_field) {
            self.next_field();
        }
    }

    /// Handle character input on the active text field
    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            FieldId::FullName => {
                if self.name_input.push_char(c) {
                    let name = self.name_input.as_str().to_string();
                    self.form.apply(FormEvent::NameChanged(name));
                }
            }
            FieldId::GraduationYear => {
                if self.year_input.push_char(c) {
                    let year = self.year_input.as_str().to_string();
                    self.form.apply(FormEvent::YearChanged(year));
                }
            }
            FieldId::CertificateFile => {
                self.file_path_input.push_char(c);
            }
            _ => {}
        }
    }

    /// Handle backspace on the active text field
    pub fn backspace(&mut self) {
        match self.active_field {
            FieldId::FullName => {
                if self.name_input.pop_char() {
                    let name = self.name_input.as_str().to_string();
                    self.form.apply(FormEvent::NameChanged(name));
                }
            }
            FieldId::GraduationYear => {
                if self.year_input.pop_char() {
                    let year = self.year_input.as_str().to_string();
                    self.form.apply(FormEvent::YearChanged(year));
                }
            }
            FieldId::CertificateFile => {
                self.file_path_input.pop_char();
            }
            _ => {}
        }
    }

    /// Cycle the active choice field through its legal options
    pub fn cycle_choice(&mut self, forward: bool) {
        let fields = &self.form.fields;
        let event = match self.active_field {
            FieldId::Stage => FormEvent::StageSelected(cycle(&Stage::ALL, fields.stage, forward)),
            FieldId::Grade => FormEvent::GradeSelected(cycle::<Grade>(
                &resolver::legal_grades(fields.stage),
                fields.grade,
                forward,
            )),
            FieldId::CertificateType => FormEvent::CertificateTypeSelected(cycle::<CertificateType>(
                &resolver::legal_certificate_types(fields.stage),
                fields.certificate_type,
                forward,
            )),
            _ => return,
        };
        self.form.apply(event);
        self.ensure_active_visible();
    }

    /// Clear the text buffers after the form was reset
    pub fn clear_inputs(&mut self) {
        self.name_input.clear();
        self.year_input.clear();
        self.file_path_input.clear();
        self.active_field = FieldId::FullName;
    }

    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    /// Dismiss the error currently shown
    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

/// Step through `[unset, options...]`, wrapping at both ends
fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> Option<T> {
    if options.is_empty() {
        return None;
    }
    let slots = options.len() + 1;
    let index = current
        .and_then(|c| options.iter().position(|o| *o == c))
        .map_or(0, |i| i + 1);
    let next = if forward {
        (index + 1) % slots
    } else {
        (index + slots - 1) % slots
    };
    if next == 0 {
        None
    } else {
        Some(options[next - 1])
    }
}

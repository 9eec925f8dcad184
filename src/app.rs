//! Application state and core logic

use crate::state::validation::check_file;
use crate::state::{AppState, CertificateFile, FieldId, FormEvent, SubmissionStatus};
use crate::submission::{
    begin, finish, PendingSubmission, SubmissionOrchestrator, SubmissionTransport, SubmitAttempt,
    TransportResult,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::Path;
use std::sync::Arc;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Sends validated forms
    orchestrator: SubmissionOrchestrator,
    /// The in-flight submission, if any
    pending: Option<PendingSubmission>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(transport: Arc<dyn SubmissionTransport>) -> Self {
        Self {
            state: AppState::default(),
            orchestrator: SubmissionOrchestrator::new(transport),
            pending: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub fn is_submitting(&self) -> bool {
        self.state.form.status().is_submitting()
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Shortcuts that work from any field
        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.start_submission();
            }
            KeyCode::Char('y') if key.modifiers.contains(crate::platform::COPY_MODIFIER) => {
                self.copy_submission_id();
                return Ok(());
            }
            _ => {}
        }

        // Fields are read-only while a request is in flight
        if self.is_submitting() {
            return Ok(());
        }

        let on_choice = self.state.active_field.is_choice();
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_field(),
            KeyCode::Right if on_choice => self.state.cycle_choice(true),
            KeyCode::Left if on_choice => self.state.cycle_choice(false),
            KeyCode::Enter => match self.state.active_field {
                FieldId::Submit => return self.start_submission(),
                FieldId::CertificateFile => self.load_selected_file().await,
                _ => self.state.next_field(),
            },
            KeyCode::Esc => self.state.status_message = None,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.input_char(c)
            }
            KeyCode::Backspace => self.state.backspace(),
            _ => {}
        }
        Ok(())
    }

    /// Load the file named in the path input and check it right away
    async fn load_selected_file(&mut self) {
        let path = self.state.file_path_input.as_str().trim().to_string();
        if path.is_empty() {
            self.state.form.apply(FormEvent::FileSelected(None));
            return;
        }

        match CertificateFile::load(Path::new(&path)).await {
            Ok(file) => {
                if let Err(violation) = check_file(&file) {
                    self.push_error(violation.to_string());
                }
                self.state.form.apply(FormEvent::FileSelected(Some(file)));
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "could not load certificate file");
                self.state.form.apply(FormEvent::FileSelected(None));
                self.push_error(format!("{e:#}"));
            }
        }
    }

    /// Validate and, if valid, send the form on a background task
    fn start_submission(&mut self) -> Result<()> {
        self.state.status_message = None;
        match begin(&mut self.state.form)? {
            SubmitAttempt::Ignored => {}
            SubmitAttempt::Invalid(violation) => {
                tracing::debug!(code = violation.code(), "submission blocked by validation");
                self.push_error(violation.to_string());
            }
            SubmitAttempt::Started(payload) => {
                self.pending = Some(self.orchestrator.dispatch(payload));
            }
        }
        Ok(())
    }

    /// Check whether the in-flight submission finished (non-blocking)
    pub fn poll_submission(&mut self) {
        let Some(result) = self.pending.as_mut().and_then(PendingSubmission::try_take) else {
            return;
        };
        self.pending = None;
        self.complete_submission(result);
    }

    /// Wait for the in-flight submission to finish
    #[cfg(test)]
    pub async fn wait_for_submission(&mut self) {
        if let Some(pending) = self.pending.take() {
            let result = pending.wait().await;
            self.complete_submission(result);
        }
    }

    fn complete_submission(&mut self, result: TransportResult) {
        let status = finish(&mut self.state.form, result).clone();
        match status {
            SubmissionStatus::Succeeded(id) => {
                self.state.clear_inputs();
                self.state.status_message = Some(format!("Saved ✅ — ID: {id}"));
                self.state.last_submission_id = Some(id);
            }
            SubmissionStatus::Failed(message) => self.push_error(message),
            SubmissionStatus::Idle | SubmissionStatus::Submitting => {}
        }
    }

    fn copy_submission_id(&mut self) {
        let Some(id) = self.state.last_submission_id.clone() else {
            return;
        };
        match self.copy_to_clipboard(&id) {
            Ok(()) => self.state.status_message = Some(format!("Copied ID {id}")),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard unavailable");
                self.push_error(format!("Failed to copy: {e}"));
            }
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

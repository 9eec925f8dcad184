//! Certificate form state and the reducer that applies user input to it

use super::file::CertificateFile;
use super::resolver;
use crate::state::catalog::{CertificateType, Grade, Stage};

/// Field values entered by the graduate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CertificateForm {
    pub full_name: String,
    pub stage: Option<Stage>,
    pub grade: Option<Grade>,
    pub certificate_type: Option<CertificateType>,
    /// Raw year text as typed
    pub graduation_year: String,
    pub file: Option<CertificateFile>,
}

impl CertificateForm {
    /// Whether the grade field applies to the current stage
    pub fn grade_applicable(&self) -> bool {
        self.stage.is_some_and(|s| s.has_grades())
    }
}

/// A single user input against the form
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    NameChanged(String),
    StageSelected(Option<Stage>),
    GradeSelected(Option<Grade>),
    CertificateTypeSelected(Option<CertificateType>),
    YearChanged(String),
    FileSelected(Option<CertificateFile>),
}

/// Apply an event to the form.
///
/// Stage changes reconcile grade and certificate type before returning.
/// A grade or certificate type that is not legal for the current stage is
/// ignored and the field keeps its previous value.
pub fn reduce(mut form: CertificateForm, event: FormEvent) -> CertificateForm {
    match event {
        FormEvent::NameChanged(name) => form.full_name = name,
        FormEvent::StageSelected(stage) => {
            if form.stage != stage {
                tracing::debug!(?stage, "stage changed");
            }
            form.stage = stage;
            form = resolver::reconcile(form);
        }
        FormEvent::GradeSelected(None) => form.grade = None,
        FormEvent::GradeSelected(Some(grade)) => {
            if resolver::legal_grades(form.stage).contains(&grade) {
                form.grade = Some(grade);
            } else {
                tracing::debug!(%grade, stage = ?form.stage, "ignoring grade not legal for stage");
            }
        }
        FormEvent::CertificateTypeSelected(None) => form.certificate_type = None,
        FormEvent::CertificateTypeSelected(Some(certificate_type)) => {
            if resolver::legal_certificate_types(form.stage).contains(&certificate_type) {
                form.certificate_type = Some(certificate_type);
            } else {
                tracing::debug!(
                    %certificate_type,
                    stage = ?form.stage,
                    "ignoring certificate type not legal for stage"
                );
            }
        }
        FormEvent::YearChanged(year) => form.graduation_year = year,
        FormEvent::FileSelected(file) => form.file = file,
    }
    form
}

/// Lifecycle of the single outstanding submission
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    /// Accepted by the server with this identifier
    Succeeded(String),
    /// Rejected or not delivered; message is shown to the user
    Failed(String),
}

impl SubmissionStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// Form values plus submission status.
///
/// The status is only changed by the submission orchestrator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub fields: CertificateForm,
    status: SubmissionStatus,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Apply a user input event to the fields
    pub fn apply(&mut self, event: FormEvent) {
        let fields = std::mem::take(&mut self.fields);
        self.fields = reduce(fields, event);
    }

    pub(crate) fn set_status(&mut self, status: SubmissionStatus) {
        self.status = status;
    }

    /// Clear every field back to the empty form
    pub(crate) fn reset_fields(&mut self) {
        self.fields = CertificateForm::default();
    }
}

//! Packaging a validated form into the multipart upload

use crate::state::catalog::{self, CertificateType, Grade, Stage};
use crate::state::validation::normalize_name;
use crate::state::{CertificateFile, CertificateForm};
use reqwest::multipart::{Form, Part};
use thiserror::Error;

pub const FIELD_FULL_NAME: &str = "full_name";
pub const FIELD_STAGE_TRACK: &str = "stage_track";
pub const FIELD_STAGE_GRADE: &str = "stage_grade";
pub const FIELD_CERTIFICATE_TYPE: &str = "certificate_type";
pub const FIELD_GRADUATION_YEAR: &str = "graduation_year";
pub const FIELD_CERTIFICATE_FILE: &str = "certificate_file";

/// A form that passed validation but cannot be packaged.
///
/// Reaching this means the reducer let an illegal combination through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackagingError {
    #[error("form is inconsistent: {0}")]
    Inconsistent(&'static str),
}

/// Everything sent in one submission request
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    pub full_name: String,
    pub stage_track: Stage,
    /// Absent for university submissions
    pub stage_grade: Option<Grade>,
    pub certificate_type: CertificateType,
    pub graduation_year: String,
    pub certificate_file: CertificateFile,
}

impl SubmissionPayload {
    /// Text parts in wire order; `stage_grade` only when present
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            (FIELD_FULL_NAME, self.full_name.clone()),
            (FIELD_STAGE_TRACK, self.stage_track.as_str().to_string()),
        ];
        if let Some(grade) = self.stage_grade {
            fields.push((FIELD_STAGE_GRADE, grade.to_string()));
        }
        fields.push((
            FIELD_CERTIFICATE_TYPE,
            self.certificate_type.as_str().to_string(),
        ));
        fields.push((FIELD_GRADUATION_YEAR, self.graduation_year.clone()));
        fields
    }

    /// Names of every part in the request, file part last
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.text_fields().into_iter().map(|(k, _)| k).collect();
        names.push(FIELD_CERTIFICATE_FILE);
        names
    }

    /// Build the multipart body
    pub fn into_multipart(self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }
        let file = self.certificate_file;
        let part = Part::bytes(file.data)
            .file_name(file.file_name)
            .mime_str(file.content_type.as_ref())?;
        Ok(form.part(FIELD_CERTIFICATE_FILE, part))
    }
}

/// Convert a validated form into a payload
pub fn package(form: &CertificateForm) -> Result<SubmissionPayload, PackagingError> {
    let full_name = normalize_name(&form.full_name);
    if full_name.is_empty() {
        return Err(PackagingError::Inconsistent("empty full name"));
    }

    let stage = form
        .stage
        .ok_or(PackagingError::Inconsistent("stage missing"))?;

    let certificate_type = form
        .certificate_type
        .ok_or(PackagingError::Inconsistent("certificate type missing"))?;
    if !catalog::is_certificate_type_legal(stage, certificate_type) {
        return Err(PackagingError::Inconsistent(
            "certificate type not legal for stage",
        ));
    }

    let stage_grade = if stage.has_grades() {
        let grade = form
            .grade
            .ok_or(PackagingError::Inconsistent("grade missing"))?;
        if !catalog::is_grade_legal(stage, grade) {
            return Err(PackagingError::Inconsistent("grade not legal for stage"));
        }
        Some(grade)
    } else {
        None
    };

    if form.graduation_year.is_empty() {
        return Err(PackagingError::Inconsistent("graduation year missing"));
    }

    let certificate_file = form
        .file
        .clone()
        .ok_or(PackagingError::Inconsistent("certificate file missing"))?;

    Ok(SubmissionPayload {
        full_name,
        stage_track: stage,
        stage_grade,
        certificate_type,
        graduation_year: form.graduation_year.clone(),
        certificate_file,
    })
}

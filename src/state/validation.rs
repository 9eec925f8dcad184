//! Field validation rules, checked in a fixed priority order

use super::catalog::Stage;
use super::forms::{CertificateFile, CertificateForm};
use thiserror::Error;

/// Earliest graduation year accepted
pub const MIN_GRADUATION_YEAR: u32 = 2021;

/// Largest accepted attachment (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Minimum number of whitespace-separated name parts
pub const MIN_NAME_PARTS: usize = 3;

const ACCEPTED_MIME_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

/// First rule a form breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Full name must have at least three parts.")]
    InvalidName,
    #[error("Choose a stage.")]
    MissingStage,
    #[error("Choose a certificate type.")]
    MissingCertificateType,
    #[error("Choose a grade.")]
    MissingGrade,
    #[error("Graduation year must be 2021 or later.")]
    InvalidYear,
    #[error("Please choose the certificate file.")]
    MissingFile,
    #[error("The file must be a PDF, JPG or PNG.")]
    InvalidFileType,
    #[error("The file is larger than 10MB.")]
    FileTooLarge,
}

impl Violation {
    /// Stable code for the presentation layer
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidName => "invalid_name",
            Self::MissingStage => "missing_stage",
            Self::MissingCertificateType => "missing_certificate_type",
            Self::MissingGrade => "missing_grade",
            Self::InvalidYear => "invalid_year",
            Self::MissingFile => "missing_file",
            Self::InvalidFileType => "invalid_file_type",
            Self::FileTooLarge => "file_too_large",
        }
    }
}

/// Trim and collapse internal whitespace to single spaces
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn check_name(name: &str) -> Result<(), Violation> {
    if name.split_whitespace().count() < MIN_NAME_PARTS {
        return Err(Violation::InvalidName);
    }
    Ok(())
}

/// Year must be exactly four ASCII digits and not before 2021
pub fn check_year(year: &str) -> Result<(), Violation> {
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Violation::InvalidYear);
    }
    match year.parse::<u32>() {
        Ok(value) if value >= MIN_GRADUATION_YEAR => Ok(()),
        _ => Err(Violation::InvalidYear),
    }
}

/// Type and size check for an attachment.
///
/// Also run eagerly when a file is picked.
pub fn check_file(file: &CertificateFile) -> Result<(), Violation> {
    if !ACCEPTED_MIME_TYPES.contains(&file.content_type.essence_str()) {
        return Err(Violation::InvalidFileType);
    }
    if file.size() > MAX_FILE_SIZE {
        return Err(Violation::FileTooLarge);
    }
    Ok(())
}

/// Validate the whole form, returning the highest-priority violation
pub fn validate(form: &CertificateForm) -> Result<(), Violation> {
    check_name(&form.full_name)?;
    let stage = form.stage.ok_or(Violation::MissingStage)?;
    if form.certificate_type.is_none() {
        return Err(Violation::MissingCertificateType);
    }
    if stage != Stage::University && form.grade.is_none() {
        return Err(Violation::MissingGrade);
    }
    check_year(&form.graduation_year)?;
    let file = form.file.as_ref().ok_or(Violation::MissingFile)?;
    check_file(file)
}

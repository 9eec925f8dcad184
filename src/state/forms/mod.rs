//! Form domain layer
//!
//! Field values, the input reducer and the stage dependency resolver.

mod field;
mod file;
mod form_state;
pub mod resolver;

pub use field::{FieldId, InputFilter, TextInput};
pub use file::CertificateFile;
pub use form_state::{CertificateForm, FormEvent, FormState, SubmissionStatus};

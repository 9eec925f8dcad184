//! Form field identifiers and text input buffers

/// Fields of the certificate form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldId {
    #[default]
    FullName,
    Stage,
    Grade,
    CertificateType,
    GraduationYear,
    CertificateFile,
    /// The submit button row
    Submit,
}

impl FieldId {
    pub const ORDER: [FieldId; 7] = [
        FieldId::FullName,
        FieldId::Stage,
        FieldId::Grade,
        FieldId::CertificateType,
        FieldId::GraduationYear,
        FieldId::CertificateFile,
        FieldId::Submit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full name (three parts)",
            Self::Stage => "Stage",
            Self::Grade => "Grade",
            Self::CertificateType => "Certificate type",
            Self::GraduationYear => "Graduation year",
            Self::CertificateFile => "Certificate file (PDF/JPG/PNG, up to 10MB)",
            Self::Submit => "Submit",
        }
    }

    /// Fields edited by cycling through options rather than typing
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Stage | Self::Grade | Self::CertificateType)
    }

    fn index(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    /// Next field in tab order (wraps around)
    pub fn next(&self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    /// Previous field in tab order (wraps around)
    pub fn prev(&self) -> Self {
        let index = self.index();
        if index == 0 {
            Self::ORDER[Self::ORDER.len() - 1]
        } else {
            Self::ORDER[index - 1]
        }
    }
}

/// Which characters a text input accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFilter {
    Any,
    Digits,
}

/// Editable single-line text buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    max_chars: Option<usize>,
    filter: InputFilter,
}

impl TextInput {
    /// Create an unrestricted text input
    pub fn new() -> Self {
        Self {
            value: String::new(),
            max_chars: None,
            filter: InputFilter::Any,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    pub fn with_filter(mut self, filter: InputFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Push a character; returns false if the filter or length cap rejected it
    pub fn push_char(&mut self, c: char) -> bool {
        if self.filter == InputFilter::Digits && !c.is_ascii_digit() {
            return false;
        }
        if self
            .max_chars
            .is_some_and(|max| self.value.chars().count() >= max)
        {
            return false;
        }
        self.value.push(c);
        true
    }

    /// Remove the last character
    pub fn pop_char(&mut self) -> bool {
        self.value.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

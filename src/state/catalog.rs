//! Domain catalog: stages, grades, certificate types and which combinations are legal

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level educational track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Primary,
    Middle,
    High,
    University,
}

impl Stage {
    /// All stages in display order
    pub const ALL: [Stage; 4] = [Stage::Primary, Stage::Middle, Stage::High, Stage::University];

    /// Value sent over the wire as `stage_track`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY",
            Self::Middle => "MIDDLE",
            Self::High => "HIGH",
            Self::University => "UNIVERSITY",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Middle => "Middle",
            Self::High => "High",
            Self::University => "University",
        }
    }

    /// Whether grades apply to this stage
    pub fn has_grades(&self) -> bool {
        !matches!(self, Self::University)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Year within a school stage (1-6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Grade(u8);

impl Grade {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Create a grade, returning `None` outside 1-6
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Ordinal label used by the grade picker
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "First",
            2 => "Second",
            3 => "Third",
            4 => "Fourth",
            5 => "Fifth",
            _ => "Sixth",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Category of credential being claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateType {
    Primary,
    Middle,
    High,
    Bachelor,
    Master,
    Phd,
}

impl CertificateType {
    /// Value sent over the wire as `certificate_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY",
            Self::Middle => "MIDDLE",
            Self::High => "HIGH",
            Self::Bachelor => "BACHELOR",
            Self::Master => "MASTER",
            Self::Phd => "PHD",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Middle => "Middle",
            Self::High => "High",
            Self::Bachelor => "Bachelor",
            Self::Master => "Master",
            Self::Phd => "PhD",
        }
    }
}

impl fmt::Display for CertificateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const UNIVERSITY_TYPES: [CertificateType; 3] = [
    CertificateType::Bachelor,
    CertificateType::Master,
    CertificateType::Phd,
];

/// Legal grades for a stage, in ascending order
pub fn grades_for(stage: Stage) -> Vec<Grade> {
    let max = match stage {
        Stage::Primary => 6,
        Stage::Middle | Stage::High => 3,
        Stage::University => 0,
    };
    (Grade::MIN..=max).filter_map(Grade::new).collect()
}

/// Legal certificate types for a stage.
///
/// A school stage admits exactly the certificate that mirrors it.
pub fn certificate_types_for(stage: Stage) -> Vec<CertificateType> {
    match stage {
        Stage::Primary => vec![CertificateType::Primary],
        Stage::Middle => vec![CertificateType::Middle],
        Stage::High => vec![CertificateType::High],
        Stage::University => UNIVERSITY_TYPES.to_vec(),
    }
}

pub fn is_grade_legal(stage: Stage, grade: Grade) -> bool {
    grades_for(stage).contains(&grade)
}

pub fn is_certificate_type_legal(stage: Stage, certificate_type: CertificateType) -> bool {
    certificate_types_for(stage).contains(&certificate_type)
}

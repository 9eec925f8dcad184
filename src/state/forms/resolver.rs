//! Dependency resolution between the stage and its dependent fields

use super::form_state::CertificateForm;
use crate::state::catalog::{self, CertificateType, Grade, Stage};

/// Grades selectable for the current stage (empty when no stage is chosen)
pub fn legal_grades(stage: Option<Stage>) -> Vec<Grade> {
    stage.map(catalog::grades_for).unwrap_or_default()
}

/// Certificate types selectable for the current stage (empty when no stage is chosen)
pub fn legal_certificate_types(stage: Option<Stage>) -> Vec<CertificateType> {
    stage.map(catalog::certificate_types_for).unwrap_or_default()
}

/// Clear grade and certificate type if they are no longer legal for the stage.
///
/// Idempotent: reconciling an already reconciled form changes nothing.
pub fn reconcile(mut form: CertificateForm) -> CertificateForm {
    let types = legal_certificate_types(form.stage);
    if let Some(current) = form.certificate_type {
        if !types.contains(&current) {
            tracing::debug!(
                certificate_type = %current,
                "clearing certificate type after stage change"
            );
            form.certificate_type = None;
        }
    }

    if form.stage == Some(Stage::University) {
        form.grade = None;
    }

    let grades = legal_grades(form.stage);
    if let Some(current) = form.grade {
        if !grades.contains(&current) {
            tracing::debug!(grade = %current, "clearing grade after stage change");
            form.grade = None;
        }
    }

    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grade(n: u8) -> Option<Grade> {
        Grade::new(n)
    }

    fn form(
        stage: Option<Stage>,
        grade: Option<Grade>,
        certificate_type: Option<CertificateType>,
    ) -> CertificateForm {
        CertificateForm {
            stage,
            grade,
            certificate_type,
            ..Default::default()
        }
    }

    const ALL_TYPES: [CertificateType; 6] = [
        CertificateType::Primary,
        CertificateType::Middle,
        CertificateType::High,
        CertificateType::Bachelor,
        CertificateType::Master,
        CertificateType::Phd,
    ];

    #[test]
    fn test_narrowing_stage_clears_out_of_range_grade_and_type() {
        let before = form(Some(Stage::High), grade(5), Some(CertificateType::Primary));
        let after = reconcile(before);
        assert_eq!(after.grade, None);
        assert_eq!(after.certificate_type, None);
    }

    #[test]
    fn test_narrowing_stage_keeps_grade_in_range() {
        let after = reconcile(form(Some(Stage::Middle), grade(2), None));
        assert_eq!(after.grade, grade(2));
    }

    #[test]
    fn test_university_clears_grade() {
        let after = reconcile(form(Some(Stage::University), grade(1), None));
        assert_eq!(after.grade, None);
    }

    #[test]
    fn test_university_keeps_university_type() {
        let after = reconcile(form(
            Some(Stage::University),
            None,
            Some(CertificateType::Master),
        ));
        assert_eq!(after.certificate_type, Some(CertificateType::Master));
    }

    #[test]
    fn test_no_stage_clears_dependents() {
        let after = reconcile(form(None, grade(1), Some(CertificateType::High)));
        assert_eq!(after.grade, None);
        assert_eq!(after.certificate_type, None);
    }

    #[test]
    fn test_reconciled_state_is_legal_for_every_combination() {
        for stage in Stage::ALL {
            for g in 1..=6 {
                for t in ALL_TYPES {
                    let after = reconcile(form(Some(stage), grade(g), Some(t)));
                    if let Some(t) = after.certificate_type {
                        assert!(catalog::certificate_types_for(stage).contains(&t));
                    }
                    if let Some(g) = after.grade {
                        assert!(catalog::grades_for(stage).contains(&g));
                    }
                    if stage == Stage::University {
                        assert_eq!(after.grade, None);
                    }
                }
            }
        }
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        for stage in Stage::ALL {
            for t in ALL_TYPES {
                let once = reconcile(form(Some(stage), grade(4), Some(t)));
                let twice = reconcile(once.clone());
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn test_legal_sets_empty_without_stage() {
        assert!(legal_grades(None).is_empty());
        assert!(legal_certificate_types(None).is_empty());
    }
}

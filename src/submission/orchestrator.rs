//! Submission lifecycle: Idle -> Submitting -> Succeeded | Failed

use super::payload::{package, PackagingError, SubmissionPayload};
use super::traits::{SubmissionTransport, SubmitResponse, TransportError};
use crate::state::validation::validate;
use crate::state::{FormState, SubmissionStatus, Violation};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Shown when the server rejects a submission without a message
pub const SEND_FAILED_MESSAGE: &str = "Submission could not be sent";

/// Shown when no usable response came back
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected error while submitting";

/// Faults that must never happen for a reconciled form
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("internal consistency fault: {0}")]
    Internal(#[from] PackagingError),
}

/// Result of asking to start a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
    /// A submission is already in flight
    Ignored,
    /// Validation failed; nothing was sent
    Invalid(Violation),
    /// Status is now Submitting; send this payload
    Started(SubmissionPayload),
}

/// Validate, package and enter Submitting.
///
/// Reads the form exactly once, before any network activity.
pub fn begin(state: &mut FormState) -> Result<SubmitAttempt, SubmitError> {
    if state.status().is_submitting() {
        tracing::debug!("submit ignored, request already in flight");
        return Ok(SubmitAttempt::Ignored);
    }

    if let Err(violation) = validate(&state.fields) {
        state.set_status(SubmissionStatus::Idle);
        return Ok(SubmitAttempt::Invalid(violation));
    }

    let payload = package(&state.fields).map_err(|e| {
        tracing::error!(error = %e, "validated form failed to package");
        SubmitError::from(e)
    })?;

    tracing::info!(
        stage = %payload.stage_track,
        certificate_type = %payload.certificate_type,
        file_size = payload.certificate_file.size(),
        "submitting certificate"
    );
    state.set_status(SubmissionStatus::Submitting);
    Ok(SubmitAttempt::Started(payload))
}

/// Move to a terminal state from the transport result.
///
/// Success resets every field; failure leaves them untouched.
pub fn finish(state: &mut FormState, result: TransportResult) -> &SubmissionStatus {
    let status = match result {
        Ok(response) if response.is_success() => match response.id {
            Some(id) => {
                tracing::info!(%id, "submission accepted");
                state.reset_fields();
                SubmissionStatus::Succeeded(id)
            }
            None => {
                tracing::warn!(status = response.status, "success response without an id");
                SubmissionStatus::Failed(
                    response
                        .message
                        .unwrap_or_else(|| SEND_FAILED_MESSAGE.to_string()),
                )
            }
        },
        Ok(response) => {
            tracing::warn!(
                status = response.status,
                message = ?response.message,
                "submission rejected"
            );
            SubmissionStatus::Failed(
                response
                    .message
                    .unwrap_or_else(|| SEND_FAILED_MESSAGE.to_string()),
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "submission transport failed");
            SubmissionStatus::Failed(UNEXPECTED_ERROR_MESSAGE.to_string())
        }
    };
    state.set_status(status);
    state.status()
}

/// What a transport call produced
pub type TransportResult = Result<SubmitResponse, TransportError>;

/// A payload being sent on a background task
#[derive(Debug)]
pub struct PendingSubmission {
    rx: oneshot::Receiver<TransportResult>,
}

fn task_vanished() -> TransportError {
    TransportError::Network("submission task ended without a result".to_string())
}

impl PendingSubmission {
    /// Take the result if the transport has answered (non-blocking)
    pub fn try_take(&mut self) -> Option<TransportResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(task_vanished())),
        }
    }

    /// Wait for the transport to answer
    #[cfg(test)]
    pub async fn wait(self) -> TransportResult {
        self.rx.await.unwrap_or_else(|_| Err(task_vanished()))
    }
}

/// Drives submissions through a transport
pub struct SubmissionOrchestrator {
    transport: Arc<dyn SubmissionTransport>,
}

impl SubmissionOrchestrator {
    pub fn new(transport: Arc<dyn SubmissionTransport>) -> Self {
        Self { transport }
    }

    /// Send a started payload without blocking the caller.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, payload: SubmissionPayload) -> PendingSubmission {
        let transport = Arc::clone(&self.transport);
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = transport.submit(payload).await;
            // Receiver is only gone when the app is shutting down
            let _ = tx.send(result);
        });
        PendingSubmission { rx }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::{CertificateType, Grade, Stage};
    use crate::state::{CertificateFile, FormEvent};
    use crate::submission::MockSubmissionTransport;

    fn filled_state() -> FormState {
        let mut state = FormState::new();
        state.apply(FormEvent::NameChanged("Ahmed Ali Hassan".into()));
        state.apply(FormEvent::StageSelected(Some(Stage::Primary)));
        state.apply(FormEvent::GradeSelected(Grade::new(3)));
        state.apply(FormEvent::CertificateTypeSelected(Some(
            CertificateType::Primary,
        )));
        state.apply(FormEvent::YearChanged("2022".into()));
        state.apply(FormEvent::FileSelected(Some(CertificateFile::new(
            "diploma.pdf",
            mime::APPLICATION_PDF,
            b"%PDF".to_vec(),
        ))));
        state
    }

    fn ok_response(id: &str) -> SubmitResponse {
        SubmitResponse {
            status: 200,
            id: Some(id.to_string()),
            message: None,
        }
    }

    fn orchestrator(mock: MockSubmissionTransport) -> SubmissionOrchestrator {
        SubmissionOrchestrator::new(Arc::new(mock))
    }

    mod begin_phase {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_form_enters_submitting() {
            let mut state = filled_state();
            let attempt = begin(&mut state).unwrap();
            assert!(matches!(attempt, SubmitAttempt::Started(_)));
            assert_eq!(state.status(), &SubmissionStatus::Submitting);
        }

        #[test]
        fn test_invalid_form_stays_idle() {
            let mut state = filled_state();
            state.apply(FormEvent::NameChanged("Ahmed Ali".into()));
            let attempt = begin(&mut state).unwrap();
            assert_eq!(attempt, SubmitAttempt::Invalid(Violation::InvalidName));
            assert_eq!(state.status(), &SubmissionStatus::Idle);
        }

        #[test]
        fn test_invalid_after_failure_returns_to_idle() {
            let mut state = filled_state();
            state.set_status(SubmissionStatus::Failed("nope".into()));
            state.apply(FormEvent::YearChanged("2019".into()));
            let attempt = begin(&mut state).unwrap();
            assert_eq!(attempt, SubmitAttempt::Invalid(Violation::InvalidYear));
            assert_eq!(state.status(), &SubmissionStatus::Idle);
        }

        #[test]
        fn test_begin_while_submitting_is_ignored() {
            let mut state = filled_state();
            begin(&mut state).unwrap();
            let again = begin(&mut state).unwrap();
            assert_eq!(again, SubmitAttempt::Ignored);
            assert_eq!(state.status(), &SubmissionStatus::Submitting);
        }

        #[test]
        fn test_inconsistent_form_is_internal_error() {
            let mut state = filled_state();
            // Bypass the reducer to plant an illegal combination
            state.fields.certificate_type = Some(CertificateType::Phd);
            let result = begin(&mut state);
            assert!(matches!(result, Err(SubmitError::Internal(_))));
            assert_eq!(state.status(), &SubmissionStatus::Idle);
        }
    }

    mod finish_phase {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_success_resets_fields() {
            let mut state = filled_state();
            begin(&mut state).unwrap();
            let status = finish(&mut state, Ok(ok_response("abc"))).clone();
            assert_eq!(status, SubmissionStatus::Succeeded("abc".into()));
            assert_eq!(state.fields, Default::default());
        }

        #[test]
        fn test_rejection_uses_server_message_and_keeps_fields() {
            let mut state = filled_state();
            let before = state.fields.clone();
            begin(&mut state).unwrap();
            finish(
                &mut state,
                Ok(SubmitResponse {
                    status: 409,
                    id: None,
                    message: Some("already submitted".into()),
                }),
            );
            assert_eq!(
                state.status(),
                &SubmissionStatus::Failed("already submitted".into())
            );
            assert_eq!(state.fields, before);
        }

        #[test]
        fn test_rejection_without_message_uses_fallback() {
            let mut state = filled_state();
            begin(&mut state).unwrap();
            finish(
                &mut state,
                Ok(SubmitResponse {
                    status: 500,
                    ..Default::default()
                }),
            );
            assert_eq!(
                state.status(),
                &SubmissionStatus::Failed(SEND_FAILED_MESSAGE.into())
            );
        }

        #[test]
        fn test_success_without_id_is_failure() {
            let mut state = filled_state();
            begin(&mut state).unwrap();
            finish(
                &mut state,
                Ok(SubmitResponse {
                    status: 200,
                    ..Default::default()
                }),
            );
            assert_eq!(
                state.status(),
                &SubmissionStatus::Failed(SEND_FAILED_MESSAGE.into())
            );
            assert!(!state.fields.full_name.is_empty());
        }

        #[test]
        fn test_transport_error_uses_fallback() {
            let mut state = filled_state();
            let before = state.fields.clone();
            begin(&mut state).unwrap();
            finish(
                &mut state,
                Err(TransportError::Network("connection refused".into())),
            );
            assert_eq!(
                state.status(),
                &SubmissionStatus::Failed(UNEXPECTED_ERROR_MESSAGE.into())
            );
            assert_eq!(state.fields, before);
        }
    }

    mod full_submit {
        use super::*;
        use pretty_assertions::assert_eq;

        /// Run one submission to a terminal state
        async fn run(
            orchestrator: &SubmissionOrchestrator,
            state: &mut FormState,
        ) -> SubmitAttempt {
            let attempt = begin(state).unwrap();
            if let SubmitAttempt::Started(payload) = &attempt {
                let result = orchestrator.dispatch(payload.clone()).wait().await;
                finish(state, result);
            }
            attempt
        }

        #[tokio::test]
        async fn test_submit_sends_packaged_payload() {
            let mut mock = MockSubmissionTransport::new();
            mock.expect_submit()
                .withf(|p| p.full_name == "Ahmed Ali Hassan" && p.stage_grade == Grade::new(3))
                .times(1)
                .returning(|_| Ok(ok_response("id-1")));

            let mut state = filled_state();
            let attempt = run(&orchestrator(mock), &mut state).await;
            assert!(matches!(attempt, SubmitAttempt::Started(_)));
            assert_eq!(state.status(), &SubmissionStatus::Succeeded("id-1".into()));
        }

        #[tokio::test]
        async fn test_invalid_form_never_calls_transport() {
            let mut mock = MockSubmissionTransport::new();
            mock.expect_submit().times(0);

            let mut state = FormState::new();
            let attempt = run(&orchestrator(mock), &mut state).await;
            assert_eq!(attempt, SubmitAttempt::Invalid(Violation::InvalidName));
        }

        #[tokio::test]
        async fn test_submit_while_submitting_sends_nothing() {
            let mut mock = MockSubmissionTransport::new();
            mock.expect_submit().times(0);

            let mut state = filled_state();
            state.set_status(SubmissionStatus::Submitting);
            let attempt = run(&orchestrator(mock), &mut state).await;
            assert_eq!(attempt, SubmitAttempt::Ignored);
        }

        #[tokio::test]
        async fn test_try_take_returns_result_once_answered() {
            let mut mock = MockSubmissionTransport::new();
            mock.expect_submit()
                .times(1)
                .returning(|_| Ok(ok_response("id-3")));

            let mut state = filled_state();
            let SubmitAttempt::Started(payload) = begin(&mut state).unwrap() else {
                panic!("expected a started submission");
            };
            let mut pending = orchestrator(mock).dispatch(payload);

            let mut result = None;
            for _ in 0..100 {
                result = pending.try_take();
                if result.is_some() {
                    break;
                }
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            }
            assert_eq!(result.unwrap().unwrap().id.as_deref(), Some("id-3"));
        }

        #[tokio::test]
        async fn test_retry_after_failure() {
            let mut mock = MockSubmissionTransport::new();
            let mut seq = mockall::Sequence::new();
            mock.expect_submit()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Err(TransportError::Network("timeout".into())));
            mock.expect_submit()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(ok_response("id-2")));

            let orchestrator = orchestrator(mock);
            let mut state = filled_state();
            run(&orchestrator, &mut state).await;
            assert!(matches!(state.status(), SubmissionStatus::Failed(_)));

            run(&orchestrator, &mut state).await;
            assert_eq!(state.status(), &SubmissionStatus::Succeeded("id-2".into()));
        }
    }
}

//! Trait abstraction for the submission transport to enable mocking in tests

use super::payload::SubmissionPayload;
use async_trait::async_trait;
use thiserror::Error;

/// Status and the fields the intake endpoint may return
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitResponse {
    pub status: u16,
    /// Identifier of the stored submission
    pub id: Option<String>,
    /// Human-readable message, usually on failure
    pub message: Option<String>,
}

impl SubmitResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a usable response
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build request: {0}")]
    Request(String),
    #[error("request failed: {0}")]
    Network(String),
    #[error("failed to read response: {0}")]
    Body(String),
}

/// Sends one packaged submission to the intake endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(&self, payload: SubmissionPayload) -> Result<SubmitResponse, TransportError>;
}

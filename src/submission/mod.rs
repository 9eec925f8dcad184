//! Submission module: packaging, transport and request lifecycle

mod client;
mod orchestrator;
mod payload;
mod traits;

pub use client::HttpSubmitClient;
pub use orchestrator::{
    begin, finish, PendingSubmission, SubmissionOrchestrator, SubmitAttempt, TransportResult,
};
pub use traits::SubmissionTransport;

#[cfg(test)]
pub use orchestrator::SEND_FAILED_MESSAGE;
#[cfg(test)]
pub use traits::{MockSubmissionTransport, SubmitResponse, TransportError};

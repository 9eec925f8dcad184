//! HTTP client posting submissions to the intake endpoint
//!
//! Sends the payload as `multipart/form-data` and reads the JSON reply.

use super::payload::SubmissionPayload;
use super::traits::{SubmissionTransport, SubmitResponse, TransportError};
use crate::config::IntakeConfig;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Client for the submission endpoint
pub struct HttpSubmitClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmitClient {
    /// Create a client from configuration
    pub fn new(config: &IntakeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for HttpSubmitClient {
    async fn submit(&self, payload: SubmissionPayload) -> Result<SubmitResponse, TransportError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            parts = ?payload.field_names(),
            "posting submission"
        );
        let form = payload
            .into_multipart()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        tracing::debug!(status, bytes = body.len(), "submission response received");
        Ok(parse_response(status, &body))
    }
}

#[derive(Debug, Default, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Read `id` and `message` out of a response body.
/// A body that is not a JSON object yields neither.
pub(crate) fn parse_response(status: u16, body: &[u8]) -> SubmitResponse {
    let parsed: ResponseBody = serde_json::from_slice(body).unwrap_or_default();
    let id = match parsed.id {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    let message = parsed.message.filter(|m| !m.trim().is_empty());
    SubmitResponse {
        status,
        id,
        message,
    }
}

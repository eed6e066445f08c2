use std::fmt::Debug;
use std::future::Future;

use serde_json::Value;
use tracing::debug;

use super::domain::Mode;
use super::payload::MatchPayload;

/// A fully prepared request: target URL plus body, built before any I/O.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSubmission {
    pub mode: Mode,
    pub url: String,
    pub payload: MatchPayload,
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("scoring request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("scoring service returned HTTP {status}")]
    Status { status: reqwest::StatusCode },
    #[error("scoring response is not valid JSON: {0}")]
    Body(#[from] serde_json::Error),
}

/// Outbound seam to the remote scoring service.
pub trait ScoringGateway: Debug + Send + Sync {
    fn score(
        &self,
        submission: &PreparedSubmission,
    ) -> impl Future<Output = Result<Value, ScoringError>> + Send;
}

/// JSON-over-HTTP gateway backed by `reqwest`. Issues exactly one POST per call.
#[derive(Debug, Clone, Default)]
pub struct HttpScoringGateway {
    client: reqwest::Client,
}

impl HttpScoringGateway {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ScoringGateway for HttpScoringGateway {
    async fn score(&self, submission: &PreparedSubmission) -> Result<Value, ScoringError> {
        debug!(url = %submission.url, mode = ?submission.mode, "posting compatibility request");

        let response = self
            .client
            .post(&submission.url)
            .json(&submission.payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::Status { status });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

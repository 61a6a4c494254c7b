//! HTTP assessment provider
//!
//! Talks to the talent-platform REST API:
//!
//! - `GET  {base}/api/talent/skills/assessment?skill=…`
//! - `POST {base}/api/talent/skills/assessment/start`
//! - `POST {base}/api/talent/skills/assessment/submit`
//!
//! Every request carries a timeout so a hung submit at time-zero cannot
//! strand a session in the submitting phase.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use skillgate_models::wire::{
    AnswerEntry, ApiErrorBody, AssessmentEnvelope, StartAssessmentRequest,
    StartAssessmentResponse, SubmitAssessmentRequest, SubmitAssessmentResponse,
};
use skillgate_models::{Assessment, AssessmentResult};

use super::traits::AssessmentProvider;
use crate::error::ProviderError;

const ASSESSMENT_PATH: &str = "/api/talent/skills/assessment";
const START_PATH: &str = "/api/talent/skills/assessment/start";
const SUBMIT_PATH: &str = "/api/talent/skills/assessment/submit";

/// Configuration for [`HttpProvider`]
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Base URL of the platform API
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// AssessmentProvider backed by the platform REST API
pub struct HttpProvider {
    config: HttpProviderConfig,
    client: reqwest::Client,
}

impl HttpProvider {
    /// Create a provider with the given configuration
    pub fn new(config: HttpProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Create a provider against a base URL with default settings
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        Self::new(HttpProviderConfig {
            base_url: base_url.into(),
            ..HttpProviderConfig::default()
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn transport_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout(self.config.timeout.as_secs())
        } else {
            ProviderError::Request(error.to_string())
        }
    }

    /// Extract the server's error message from a non-2xx response
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ApiErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("server returned {status}"),
        }
    }
}

#[async_trait]
impl AssessmentProvider for HttpProvider {
    async fn fetch_assessment(&self, skill: &str) -> Result<Assessment, ProviderError> {
        let response = self
            .client
            .get(self.url(ASSESSMENT_PATH))
            .query(&[("skill", skill)])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::NoAssessment(skill.to_string()));
        }
        if !response.status().is_success() {
            return Err(ProviderError::Request(Self::error_message(response).await));
        }

        let envelope: AssessmentEnvelope = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        let assessment = envelope
            .assessment
            .ok_or_else(|| ProviderError::NoAssessment(skill.to_string()))?;
        assessment.validate()?;
        Ok(assessment)
    }

    async fn start_assessment(&self, assessment_id: &str) -> Result<(), ProviderError> {
        let response = self
            .client
            .post(self.url(START_PATH))
            .json(&StartAssessmentRequest {
                assessment_id: assessment_id.to_string(),
            })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::UnknownAssessment(assessment_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(ProviderError::Request(Self::error_message(response).await));
        }

        // The acknowledgement body (start timestamp) is informational only
        if let Ok(ack) = response.json::<StartAssessmentResponse>().await {
            tracing::debug!(assessment = %assessment_id, start_time = ?ack.start_time, "assessment start acknowledged");
        }
        Ok(())
    }

    async fn submit_assessment(
        &self,
        assessment_id: &str,
        answers: &[AnswerEntry],
        time_spent_secs: u32,
    ) -> Result<AssessmentResult, ProviderError> {
        let response = self
            .client
            .post(self.url(SUBMIT_PATH))
            .json(&SubmitAssessmentRequest {
                assessment_id: assessment_id.to_string(),
                answers: answers.to_vec(),
                time_spent: time_spent_secs,
            })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                Err(ProviderError::UnknownAssessment(assessment_id.to_string()))
            }
            StatusCode::BAD_REQUEST => {
                Err(ProviderError::Rejected(Self::error_message(response).await))
            }
            status if !status.is_success() => {
                Err(ProviderError::Request(Self::error_message(response).await))
            }
            _ => {
                let body: SubmitAssessmentResponse = response
                    .json()
                    .await
                    .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
                Ok(body.result)
            }
        }
    }
}

// ABOUTME: HTTP client for the ML recommendation and health-risk collaborator
// ABOUTME: Posts snake_case payloads to /recommend and /health-risk and decodes their envelopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use std::time::Duration;

use async_trait::async_trait;
use healthmonitor_core::constants::{endpoints, service_names};
use healthmonitor_core::models::{
    RecommendationRequest, RecommendationResponse, RiskAssessment, RiskAssessmentRequest,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{status_error, MlCollaborator};
use crate::config::MlServiceConfig;
use crate::errors::{AppError, AppResult};

/// Connection timeout, kept below the per-call timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Error envelope the ML service returns with non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    details: Option<String>,
}

/// Success envelope of `/health-risk`
#[derive(Debug, Deserialize)]
struct RiskEnvelope {
    #[serde(default = "default_success")]
    success: bool,
    risk_assessment: Option<RiskAssessment>,
}

const fn default_success() -> bool {
    true
}

/// HTTP implementation of [`MlCollaborator`]
#[derive(Debug, Clone)]
pub struct MlServiceClient {
    base_url: Url,
    http_client: Client,
}

impl MlServiceClient {
    /// Create a client for the configured service
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built
    pub fn new(config: &MlServiceConfig) -> AppResult<Self> {
        // Trailing slash so relative joins append instead of replacing the last segment
        let mut base = config.base_url.trim_end_matches('/').to_owned();
        base.push('/');
        let base_url = Url::parse(&base)
            .map_err(|e| AppError::config(format!("Invalid ML service URL '{base}': {e}")))?;

        let http_client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout()))
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> AppResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| AppError::config(format!("Invalid ML endpoint '{path}': {e}")))?;
        debug!(%url, "Calling ML service");

        let response = self
            .http_client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                AppError::external_unavailable(service_names::ML_SERVICE, e.to_string())
                    .with_source(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorEnvelope>(&text)
                .ok()
                .and_then(|env| match (env.error, env.details) {
                    (Some(error), Some(details)) => Some(format!("{error}: {details}")),
                    (error, details) => error.or(details),
                })
                .unwrap_or(text);
            return Err(status_error(service_names::ML_SERVICE, status, &detail));
        }

        response.json::<R>().await.map_err(|e| {
            AppError::external_service(service_names::ML_SERVICE, format!("JSON parse error: {e}"))
        })
    }
}

#[async_trait]
impl MlCollaborator for MlServiceClient {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> AppResult<RecommendationResponse> {
        self.post_json(endpoints::ML_RECOMMEND_PATH, request).await
    }

    async fn assess_risk(&self, request: &RiskAssessmentRequest) -> AppResult<RiskAssessment> {
        let envelope: RiskEnvelope = self
            .post_json(endpoints::ML_HEALTH_RISK_PATH, request)
            .await?;

        match envelope {
            RiskEnvelope {
                success: true,
                risk_assessment: Some(assessment),
            } => Ok(assessment),
            _ => Err(AppError::external_service(
                service_names::ML_SERVICE,
                "response did not include a risk assessment",
            )),
        }
    }
}

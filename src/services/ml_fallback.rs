// ABOUTME: Fallback layer around the ML recommendation and risk-assessment collaborators
// ABOUTME: Bounds history windows, applies call timeouts, and degrades instead of failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use std::cmp::Reverse;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use healthmonitor_core::constants::{ml_limits, service_names};
use healthmonitor_core::models::{
    BatchStatus, FoodRecommendation, HealthProfile, OrderSnapshot, RecommendationBatch,
    RecommendationRequest, RiskAssessmentRequest, RiskOutcome,
};
use serde_json::{Map, Value};
use tokio::time::timeout;

use crate::config::MlServiceConfig;
use crate::errors::{AppError, AppResult};
use crate::external::MlCollaborator;
use crate::logging::AppLogger;

/// Wraps an [`MlCollaborator`] so callers always get a usable answer
#[derive(Clone)]
pub struct MlFallbackService {
    collaborator: Arc<dyn MlCollaborator>,
    config: MlServiceConfig,
}

impl MlFallbackService {
    /// Create the fallback layer
    #[must_use]
    pub fn new(collaborator: Arc<dyn MlCollaborator>, config: MlServiceConfig) -> Self {
        Self {
            collaborator,
            config,
        }
    }

    /// Ask the collaborator for food recommendations.
    ///
    /// Any collaborator failure, including a timeout, yields the first
    /// `count` candidates in the order supplied with a fixed confidence.
    pub async fn recommend(
        &self,
        user_id: &str,
        profile: Option<&HealthProfile>,
        history: &[OrderSnapshot],
        candidates: Vec<Value>,
        count: usize,
    ) -> RecommendationBatch {
        let request = RecommendationRequest {
            user_id: user_id.to_owned(),
            health_profile: profile_snapshot(profile),
            order_history: history_window(
                history,
                self.config
                    .recommendation_history_limit
                    .min(ml_limits::RECOMMENDATION_HISTORY_LIMIT),
            ),
            available_foods: candidates,
            n_recommendations: count,
        };

        match self
            .call("recommend", self.collaborator.recommend(&request))
            .await
        {
            Ok(response) => RecommendationBatch {
                total_found: response.total_found,
                recommendations: response.recommendations,
                status: BatchStatus::Model(response.model_status),
            },
            Err(_) => fallback_batch(request.available_foods, count),
        }
    }

    /// Ask the collaborator for a health-risk assessment.
    ///
    /// A failed call yields [`RiskOutcome::Unavailable`].
    pub async fn assess_risk(
        &self,
        user_id: &str,
        profile: Option<&HealthProfile>,
        history: &[OrderSnapshot],
    ) -> RiskOutcome {
        let request = RiskAssessmentRequest {
            user_id: user_id.to_owned(),
            health_profile: profile_snapshot(profile),
            order_history: history_window(
                history,
                self.config.risk_history_limit.min(ml_limits::RISK_HISTORY_LIMIT),
            ),
        };

        match self
            .call("assess_risk", self.collaborator.assess_risk(&request))
            .await
        {
            Ok(assessment) => RiskOutcome::Assessed { assessment },
            Err(e) => RiskOutcome::Unavailable {
                reason: e.to_string(),
            },
        }
    }

    async fn call<T, F>(&self, operation: &str, future: F) -> AppResult<T>
    where
        T: Send,
        F: Future<Output = AppResult<T>> + Send,
    {
        let started = Instant::now();
        let result = match timeout(self.config.timeout(), future).await {
            Ok(result) => result,
            Err(_) => Err(AppError::external_unavailable(
                service_names::ML_SERVICE,
                format!("{operation} timed out after {}s", self.config.timeout_secs),
            )),
        };

        match &result {
            Ok(_) => AppLogger::log_collaborator_call(operation, true, started.elapsed(), None),
            Err(e) => AppLogger::log_collaborator_call(
                operation,
                false,
                started.elapsed(),
                Some(&e.to_string()),
            ),
        }
        result
    }
}

/// Newest-first history truncated to `limit` entries
#[must_use]
pub fn history_window(history: &[OrderSnapshot], limit: usize) -> Vec<OrderSnapshot> {
    let mut window = history.to_vec();
    window.sort_by_key(|snapshot| Reverse(snapshot.order_info.order_date));
    window.truncate(limit);
    window
}

fn profile_snapshot(profile: Option<&HealthProfile>) -> Value {
    profile
        .and_then(|p| serde_json::to_value(p).ok())
        .unwrap_or_else(|| Value::Object(Map::new()))
}

/// Candidates in supplied order, used when the collaborator cannot answer
#[must_use]
pub fn fallback_batch(candidates: Vec<Value>, count: usize) -> RecommendationBatch {
    let recommendations: Vec<FoodRecommendation> = candidates
        .into_iter()
        .take(count)
        .map(|food| FoodRecommendation {
            food,
            confidence_score: ml_limits::FALLBACK_CONFIDENCE,
            health_score: None,
            reasoning: ml_limits::FALLBACK_REASONING.to_owned(),
            recommendation_type: ml_limits::FALLBACK_RECOMMENDATION_TYPE.to_owned(),
            extra: Map::new(),
        })
        .collect();

    RecommendationBatch {
        total_found: recommendations.len(),
        recommendations,
        status: BatchStatus::Fallback,
    }
}

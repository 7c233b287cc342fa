// ABOUTME: External collaborator clients (USDA FoodData Central, ML recommendation service)
// ABOUTME: Async traits at the collaborator seams plus their HTTP and mock implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

//! External API Clients
//!
//! The analysis service depends on the [`NutritionProvider`] and
//! [`MlCollaborator`] traits, never on a concrete client, so callers inject the
//! HTTP implementations in production and mocks in tests.

pub mod ml_client;
pub mod usda_client;

use async_trait::async_trait;
use healthmonitor_core::models::{
    RecommendationRequest, RecommendationResponse, RiskAssessment, RiskAssessmentRequest,
};
use healthmonitor_intelligence::RawNutrientRecord;
use reqwest::StatusCode;

use crate::errors::{AppError, AppResult};

pub use ml_client::MlServiceClient;
pub use usda_client::{FoodDetails, FoodNutrient, MockUsdaClient, UsdaClient};

/// Nutrition lookup collaborator: opaque catalog id to raw nutrient record
#[async_trait]
pub trait NutritionProvider: Send + Sync {
    /// Resolve one catalog id.
    ///
    /// Unknown ids resolve to [`RawNutrientRecord::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns an error when the provider cannot be reached or answers abnormally
    async fn lookup(&self, external_id: &str) -> AppResult<RawNutrientRecord>;

    /// Provider name for logs
    fn name(&self) -> &'static str;
}

/// Remote ML collaborator for recommendations and risk assessment
#[async_trait]
pub trait MlCollaborator: Send + Sync {
    /// Rank candidate foods for a user
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator fails or answers abnormally
    async fn recommend(&self, request: &RecommendationRequest)
        -> AppResult<RecommendationResponse>;

    /// Assess health risks from a profile and order history
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator fails or answers abnormally
    async fn assess_risk(&self, request: &RiskAssessmentRequest) -> AppResult<RiskAssessment>;
}

/// Map a non-success HTTP status from a collaborator onto the error taxonomy
pub(crate) fn status_error(service: &str, status: StatusCode, detail: &str) -> AppError {
    let message = format!("HTTP {status}: {detail}");
    if status == StatusCode::TOO_MANY_REQUESTS {
        AppError::rate_limited(service, message)
    } else {
        AppError::external_service(service, message)
    }
}

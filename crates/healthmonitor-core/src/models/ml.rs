// ABOUTME: Wire and result models for the ML recommendation and risk-assessment collaborators
// ABOUTME: Request payloads, pass-through responses, fallback batches, and risk outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::analysis::OrderSnapshot;

/// Payload for the recommendation collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// User the recommendations are for
    pub user_id: String,
    /// Health profile snapshot, `{}` when the user has none
    pub health_profile: Value,
    /// Newest-first order history window
    pub order_history: Vec<OrderSnapshot>,
    /// Candidate foods supplied by the caller
    pub available_foods: Vec<Value>,
    /// Number of recommendations requested
    pub n_recommendations: usize,
}

/// One recommended food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecommendation {
    /// The candidate food, echoed back as supplied
    pub food: Value,
    /// Model confidence in `[0, 1]`
    pub confidence_score: f64,
    /// Model health score, absent for fallback entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<f64>,
    /// Why the food was recommended
    #[serde(default)]
    pub reasoning: String,
    /// Producer of the recommendation (`ml_powered`, `rule_based`, `fallback`)
    #[serde(default, rename = "recommendation_type", alias = "type")]
    pub recommendation_type: String,
    /// Any additional fields the collaborator reported
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response from the recommendation collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Ranked recommendations
    #[serde(default)]
    pub recommendations: Vec<FoodRecommendation>,
    /// Status the model reported (`trained`, `fallback`, ...)
    #[serde(default)]
    pub model_status: String,
    /// Number of recommendations found
    #[serde(default)]
    pub total_found: usize,
}

/// Where a recommendation batch came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "status", rename_all = "snake_case")]
pub enum BatchStatus {
    /// Produced by the collaborator, carrying its reported status
    Model(String),
    /// Produced locally because the collaborator failed
    Fallback,
}

impl BatchStatus {
    /// Status label downstream consumers compare against
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Model(status) => status,
            Self::Fallback => "fallback",
        }
    }

    /// Whether this batch was produced locally
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Recommendations returned to callers of the fallback layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBatch {
    /// Recommendations in rank order
    pub recommendations: Vec<FoodRecommendation>,
    /// Origin of the batch
    pub status: BatchStatus,
    /// Number of recommendations found
    pub total_found: usize,
}

/// Payload for the risk-assessment collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentRequest {
    /// User being assessed
    pub user_id: String,
    /// Health profile snapshot, `{}` when the user has none
    pub health_profile: Value,
    /// Newest-first order history window
    pub order_history: Vec<OrderSnapshot>,
}

/// Model-derived risk for one condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualRisk {
    /// Risk bucket (`low`, `medium`, `high`, `very_high`)
    pub risk_level: String,
    /// Model probability
    pub probability: f64,
    /// Contributing factors
    #[serde(default)]
    pub factors: Vec<String>,
    /// Any additional fields the collaborator reported
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Aggregate risk across conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    /// Risk bucket for the average risk
    pub risk_category: String,
    /// Coarse health status
    pub health_status: String,
    /// Average risk score
    pub overall_risk_score: f64,
    /// Any additional fields the collaborator reported
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Risk assessment as reported by the collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Per-condition risks keyed by condition name
    #[serde(default)]
    pub individual_risks: BTreeMap<String, IndividualRisk>,
    /// Aggregate assessment
    pub overall_assessment: OverallAssessment,
    /// Highest-priority actions
    #[serde(default)]
    pub priority_actions: Vec<Value>,
    /// Any additional fields the collaborator reported
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of a risk-assessment request.
///
/// There is no local substitute for a model-derived risk score, so a failed
/// call surfaces as `Unavailable` instead of a fabricated assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RiskOutcome {
    /// The collaborator produced an assessment
    Assessed {
        /// The collaborator's assessment, unchanged
        assessment: RiskAssessment,
    },
    /// The collaborator could not be used
    Unavailable {
        /// Why the assessment is unavailable
        reason: String,
    },
}

impl RiskOutcome {
    /// Whether an assessment is available
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Assessed { .. })
    }
}

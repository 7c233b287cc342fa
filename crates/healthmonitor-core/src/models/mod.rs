// ABOUTME: Core data models for food order health analysis
// ABOUTME: Re-exports nutrition, order, profile, analysis, and ML collaborator types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

//! # Data Models
//!
//! Provider-agnostic data structures shared by the analysis engine, the
//! nutrition lookup client, and the ML fallback layer.
//!
//! - `NutritionVector`: canonical per-unit nutrient record
//! - `Order` / `FoodItem`: validated order input
//! - `HealthProfile`: optional read-only user context
//! - `AnalysisResult` / `HealthWarning`: analysis output
//! - `RecommendationBatch` / `RiskOutcome`: ML collaborator results

mod analysis;
mod ml;
mod nutrition;
mod order;
mod profile;

pub use analysis::{
    AnalysisResult, AnalyzedOrder, HealthWarning, OrderInfo, OrderSnapshot, PersistedAnalysis,
    WarningSeverity, WarningType,
};
pub use ml::{
    BatchStatus, FoodRecommendation, IndividualRisk, OverallAssessment, RecommendationBatch,
    RecommendationRequest, RecommendationResponse, RiskAssessment, RiskAssessmentRequest,
    RiskOutcome,
};
pub use nutrition::{NutritionVector, OrderTotals};
pub use order::{FoodItem, NewOrder, NewOrderItem, Order, OrderSource, Restaurant};
pub use profile::{
    Allergy, AllergySeverity, ChronicCondition, ConditionSeverity, DietType, HealthProfile,
};

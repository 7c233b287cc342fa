// ABOUTME: Analysis output models: health warnings, analysis result, and persisted shapes
// ABOUTME: AnalysisResult is built once per order; PersistedAnalysis is the storage boundary shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::nutrition::OrderTotals;
use crate::constants::health_score::{MAX, MIN};
use super::order::{Order, Restaurant};

/// Category of a health warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningType {
    /// Item matches a declared allergen
    Allergy,
    /// Item conflicts with the declared diet
    DietaryRestriction,
    /// Order conflicts with a chronic condition
    HealthCondition,
    /// Order exceeds the calorie threshold
    HighCalorie,
    /// Order exceeds the sodium threshold
    HighSodium,
}

/// How urgent a warning is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    /// Informational
    Low,
    /// Worth attention
    Medium,
    /// Should change behaviour
    High,
    /// Safety issue
    Critical,
}

/// A structured finding attached to an analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthWarning {
    /// Warning category
    #[serde(rename = "type")]
    pub warning_type: WarningType,
    /// Urgency
    pub severity: WarningSeverity,
    /// What was found
    pub message: String,
    /// What to do about it
    pub recommendation: String,
}

/// Complete analysis of one order.
///
/// Built once at submission time and never updated; re-analysis yields a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Order-level nutrition totals
    pub totals: OrderTotals,
    /// Findings in rule evaluation order
    pub warnings: Vec<HealthWarning>,
    /// Bounded score in `0..=100`
    pub health_score: u8,
    /// Positive feedback and suggestions
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// Whether any warning has the given type
    #[must_use]
    pub fn has_warning(&self, warning_type: WarningType) -> bool {
        self.warnings.iter().any(|w| w.warning_type == warning_type)
    }

    /// Number of warnings of the given type
    #[must_use]
    pub fn count_warnings(&self, warning_type: WarningType) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.warning_type == warning_type)
            .count()
    }
}

/// Read a stored score of any numeric shape and clamp it into `0..=100`
fn deserialize_bounded_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    let clamped = raw.round().clamp(f64::from(MIN), f64::from(MAX));
    Ok(clamped as u8)
}

/// Flat analysis shape exchanged with the storage collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAnalysis {
    /// Total calories
    pub total_calories: f64,
    /// Total protein
    pub total_protein: f64,
    /// Total carbohydrates
    pub total_carbs: f64,
    /// Total fat
    pub total_fat: f64,
    /// Total sodium
    pub total_sodium: f64,
    /// Warnings
    #[serde(default)]
    pub warnings: Vec<HealthWarning>,
    /// Score in `0..=100`; older records outside the range are clamped on load
    #[serde(deserialize_with = "deserialize_bounded_score")]
    pub health_score: u8,
    /// Recommendations
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl From<&AnalysisResult> for PersistedAnalysis {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            total_calories: result.totals.calories,
            total_protein: result.totals.protein,
            total_carbs: result.totals.carbs,
            total_fat: result.totals.fat,
            total_sodium: result.totals.sodium,
            warnings: result.warnings.clone(),
            health_score: result.health_score,
            recommendations: result.recommendations.clone(),
        }
    }
}

impl From<PersistedAnalysis> for AnalysisResult {
    fn from(persisted: PersistedAnalysis) -> Self {
        Self {
            totals: OrderTotals {
                calories: persisted.total_calories,
                protein: persisted.total_protein,
                carbs: persisted.total_carbs,
                fat: persisted.total_fat,
                sodium: persisted.total_sodium,
            },
            warnings: persisted.warnings,
            health_score: persisted.health_score,
            recommendations: persisted.recommendations,
        }
    }
}

/// An order together with its analysis, produced atomically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedOrder {
    /// Identifier assigned at creation
    pub id: Uuid,
    /// The validated order
    pub order: Order,
    /// Its analysis
    pub analysis: AnalysisResult,
    /// When the analysis ran
    pub analyzed_at: DateTime<Utc>,
}

/// Order header sent to ML collaborators inside an order history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfo {
    /// Restaurant metadata
    pub restaurant: Restaurant,
    /// When the order was placed
    pub order_date: DateTime<Utc>,
}

/// One entry of an order history window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    /// Order header
    pub order_info: OrderInfo,
    /// Stored analysis
    pub analysis: PersistedAnalysis,
}

impl From<&AnalyzedOrder> for OrderSnapshot {
    fn from(analyzed: &AnalyzedOrder) -> Self {
        Self {
            order_info: OrderInfo {
                restaurant: analyzed.order.restaurant.clone(),
                order_date: analyzed.order.order_date,
            },
            analysis: PersistedAnalysis::from(&analyzed.analysis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_serializes_with_wire_names() {
        let warning = HealthWarning {
            warning_type: WarningType::DietaryRestriction,
            severity: WarningSeverity::Medium,
            message: "m".into(),
            recommendation: "r".into(),
        };

        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["type"], "dietary-restriction");
        assert_eq!(json["severity"], "medium");
    }

    #[test]
    fn test_persisted_shape_uses_flat_totals() {
        let result = AnalysisResult {
            totals: OrderTotals {
                calories: 850.0,
                protein: 30.0,
                carbs: 90.0,
                fat: 40.0,
                sodium: 500.0,
            },
            warnings: vec![],
            health_score: 60,
            recommendations: vec![],
        };

        let json = serde_json::to_value(PersistedAnalysis::from(&result)).unwrap();
        assert_eq!(json["totalCalories"], 850.0);
        assert_eq!(json["totalSodium"], 500.0);
        assert_eq!(json["healthScore"], 60);
    }

    #[test]
    fn test_restored_score_is_bounded() {
        let persisted: PersistedAnalysis = serde_json::from_str(
            r#"{"totalCalories":0,"totalProtein":0,"totalCarbs":0,"totalFat":0,"totalSodium":0,"healthScore":140}"#,
        )
        .unwrap();

        assert_eq!(AnalysisResult::from(persisted).health_score, 100);
    }

    #[test]
    fn test_negative_stored_score_clamps_to_zero() {
        let persisted: PersistedAnalysis = serde_json::from_str(
            r#"{"totalCalories":2400,"totalProtein":0,"totalCarbs":0,"totalFat":0,"totalSodium":3100,"healthScore":-20}"#,
        )
        .unwrap();

        assert_eq!(persisted.health_score, 0);
    }

    #[test]
    fn test_fractional_stored_score_rounds() {
        let persisted: PersistedAnalysis = serde_json::from_str(
            r#"{"totalCalories":0,"totalProtein":0,"totalCarbs":0,"totalFat":0,"totalSodium":0,"healthScore":64.6}"#,
        )
        .unwrap();

        assert_eq!(persisted.health_score, 65);
    }
}

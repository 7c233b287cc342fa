// ABOUTME: Risk rule engine evaluating order totals, items, and an optional health profile
// ABOUTME: Produces warnings, recommendations, and score deltas; pure and order-preserving
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

//! # Risk Rule Engine
//!
//! Rules are independent and cumulative; evaluation never short-circuits.
//!
//! Basic rules, always evaluated:
//! 1. Calories above the high threshold: `high-calorie`/medium
//! 2. Sodium above the high threshold: `high-sodium`/medium
//! 3. Calories below the moderate threshold: positive recommendation
//!
//! Profile rules, evaluated when a profile is present, each over the items in order:
//! 4. Declared allergen found in the item name or ingredients: one `allergy`/critical per item
//! 5. Vegetarian diet and a meat keyword in the item name: `dietary-restriction`/medium
//!
//! Chronic conditions are carried on the profile for the ML collaborator; no rule scores them.

use healthmonitor_core::models::{
    DietType, FoodItem, HealthProfile, HealthWarning, OrderTotals, WarningSeverity, WarningType,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::health_score::{ScoreDelta, ScoreReason};

/// Item-name keywords that conflict with a vegetarian diet
pub const MEAT_KEYWORDS: [&str; 4] = ["chicken", "beef", "pork", "fish"];

/// Thresholds and score deltas for every rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Calories strictly above this raise a high-calorie warning (kcal)
    pub high_calorie_threshold: f64,
    /// Sodium strictly above this raises a high-sodium warning (mg)
    pub high_sodium_threshold: f64,
    /// Calories strictly below this earn a positive recommendation (kcal)
    pub moderate_calorie_threshold: f64,
    /// Delta for a high-calorie order
    pub high_calorie_delta: i32,
    /// Delta for a high-sodium order
    pub high_sodium_delta: i32,
    /// Delta for a moderate-calorie order
    pub moderate_calorie_delta: i32,
    /// Delta per item matching a declared allergen
    pub allergy_delta: i32,
    /// Delta per item conflicting with the declared diet
    pub dietary_restriction_delta: i32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            high_calorie_threshold: 800.0,
            high_sodium_threshold: 2000.0,
            moderate_calorie_threshold: 500.0,
            high_calorie_delta: -10,
            high_sodium_delta: -10,
            moderate_calorie_delta: 10,
            allergy_delta: -30,
            dietary_restriction_delta: -15,
        }
    }
}

/// Everything the rules produced for one order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Findings in evaluation order
    pub warnings: Vec<HealthWarning>,
    /// Recommendations in evaluation order
    pub recommendations: Vec<String>,
    /// Score adjustments in evaluation order
    pub score_deltas: Vec<ScoreDelta>,
}

impl RuleOutcome {
    fn push_warning(&mut self, warning: HealthWarning, reason: ScoreReason, delta: i32) {
        debug!(
            warning_type = ?warning.warning_type,
            severity = ?warning.severity,
            delta,
            "Rule fired"
        );
        self.warnings.push(warning);
        self.score_deltas.push(ScoreDelta::new(reason, delta));
    }
}

/// Evaluates the fixed rule table
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    config: RuleConfig,
}

impl RuleEngine {
    /// Create an engine with custom thresholds
    #[must_use]
    pub const fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Evaluate every rule against an order. Pure: same input, same outcome.
    #[must_use]
    pub fn evaluate(
        &self,
        totals: &OrderTotals,
        items: &[FoodItem],
        profile: Option<&HealthProfile>,
    ) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();

        self.apply_basic_rules(totals, &mut outcome);

        if let Some(profile) = profile {
            for item in items {
                self.apply_allergy_rule(item, profile, &mut outcome);
            }
            for item in items {
                self.apply_diet_rule(item, profile, &mut outcome);
            }
        }

        outcome
    }

    fn apply_basic_rules(&self, totals: &OrderTotals, outcome: &mut RuleOutcome) {
        let config = &self.config;

        if totals.calories > config.high_calorie_threshold {
            outcome.push_warning(
                HealthWarning {
                    warning_type: WarningType::HighCalorie,
                    severity: WarningSeverity::Medium,
                    message: format!(
                        "This is a high-calorie meal ({:.0}+ calories)",
                        config.high_calorie_threshold
                    ),
                    recommendation: "Consider sharing or saving half for later".to_owned(),
                },
                ScoreReason::HighCalorie,
                config.high_calorie_delta,
            );
        }

        if totals.sodium > config.high_sodium_threshold {
            outcome.push_warning(
                HealthWarning {
                    warning_type: WarningType::HighSodium,
                    severity: WarningSeverity::Medium,
                    message: format!(
                        "High sodium content detected ({:.0}mg+)",
                        config.high_sodium_threshold
                    ),
                    recommendation: "Drink plenty of water and limit sodium for the rest of the day"
                        .to_owned(),
                },
                ScoreReason::HighSodium,
                config.high_sodium_delta,
            );
        }

        if totals.calories < config.moderate_calorie_threshold {
            outcome
                .recommendations
                .push("Great choice! This is a moderate-calorie meal.".to_owned());
            outcome.score_deltas.push(ScoreDelta::new(
                ScoreReason::ModerateCalorie,
                config.moderate_calorie_delta,
            ));
        }
    }

    fn apply_allergy_rule(
        &self,
        item: &FoodItem,
        profile: &HealthProfile,
        outcome: &mut RuleOutcome,
    ) {
        let matched = matched_allergens(item, profile);
        if matched.is_empty() {
            return;
        }

        outcome.push_warning(
            HealthWarning {
                warning_type: WarningType::Allergy,
                severity: WarningSeverity::Critical,
                message: format!(
                    "ALLERGY ALERT: {} may contain {}",
                    item.name,
                    matched.join(", ")
                ),
                recommendation: "Please verify ingredients before consuming".to_owned(),
            },
            ScoreReason::Allergy,
            self.config.allergy_delta,
        );
    }

    fn apply_diet_rule(&self, item: &FoodItem, profile: &HealthProfile, outcome: &mut RuleOutcome) {
        if profile.diet_type != Some(DietType::Vegetarian) {
            return;
        }
        let name = item.name.to_lowercase();
        if !MEAT_KEYWORDS.iter().any(|meat| name.contains(meat)) {
            return;
        }

        outcome.push_warning(
            HealthWarning {
                warning_type: WarningType::DietaryRestriction,
                severity: WarningSeverity::Medium,
                message: format!("{} may not align with your vegetarian diet", item.name),
                recommendation: "Consider vegetarian alternatives".to_owned(),
            },
            ScoreReason::DietaryRestriction,
            self.config.dietary_restriction_delta,
        );
    }
}

/// Lower-cased declared allergens found in the item name or any ingredient, in declaration order
fn matched_allergens(item: &FoodItem, profile: &HealthProfile) -> Vec<String> {
    let name = item.name.to_lowercase();
    let ingredients: Vec<String> = item.ingredients.iter().map(|i| i.to_lowercase()).collect();

    let mut matched: Vec<String> = Vec::new();
    for allergy in &profile.allergies {
        let needle = allergy.allergen.trim().to_lowercase();
        if needle.is_empty() || matched.contains(&needle) {
            continue;
        }
        if name.contains(&needle) || ingredients.iter().any(|i| i.contains(&needle)) {
            matched.push(needle);
        }
    }
    matched
}

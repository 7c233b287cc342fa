// ABOUTME: Composes aggregator, rule engine, and score calculator into one order analysis
// ABOUTME: Synchronous and pure; the result is built once and never updated in place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use healthmonitor_core::models::{AnalysisResult, HealthProfile, Order};
use tracing::debug;

use crate::aggregator::aggregate_totals;
use crate::health_score::score_from_deltas;
use crate::rule_engine::RuleEngine;

/// Analyze an order whose item nutrition is already resolved
#[must_use]
pub fn analyze_order(
    order: &Order,
    profile: Option<&HealthProfile>,
    engine: &RuleEngine,
) -> AnalysisResult {
    let totals = aggregate_totals(&order.items);
    let outcome = engine.evaluate(&totals, &order.items, profile);
    let health_score = score_from_deltas(&outcome.score_deltas);

    debug!(
        restaurant = %order.restaurant.name,
        items = order.items.len(),
        calories = totals.calories,
        sodium = totals.sodium,
        warnings = outcome.warnings.len(),
        health_score,
        with_profile = profile.is_some(),
        "Order analyzed"
    );

    AnalysisResult {
        totals,
        warnings: outcome.warnings,
        health_score,
        recommendations: outcome.recommendations,
    }
}

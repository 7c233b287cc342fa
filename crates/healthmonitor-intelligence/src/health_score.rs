// ABOUTME: Health score calculator folding rule deltas into a bounded 0-100 score
// ABOUTME: Baseline 70, deltas applied in rule order, clamped on every path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use healthmonitor_core::constants::health_score::{BASELINE, MAX, MIN};
use serde::{Deserialize, Serialize};

/// Rule that produced a score adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreReason {
    /// Calories above the high threshold
    HighCalorie,
    /// Sodium above the high threshold
    HighSodium,
    /// Calories below the moderate threshold
    ModerateCalorie,
    /// Item matched a declared allergen
    Allergy,
    /// Item conflicts with the declared diet
    DietaryRestriction,
}

/// One signed adjustment to the baseline score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDelta {
    /// Producing rule
    pub reason: ScoreReason,
    /// Signed adjustment
    pub delta: i32,
}

impl ScoreDelta {
    /// Create a score delta
    #[must_use]
    pub const fn new(reason: ScoreReason, delta: i32) -> Self {
        Self { reason, delta }
    }
}

/// Fold deltas onto the baseline and clamp into `0..=100`
#[must_use]
pub fn score_from_deltas(deltas: &[ScoreDelta]) -> u8 {
    let raw = deltas
        .iter()
        .fold(i64::from(BASELINE), |score, d| score.saturating_add(i64::from(d.delta)));
    let clamped = raw.clamp(i64::from(MIN), i64::from(MAX));
    // In range after the clamp
    u8::try_from(clamped).unwrap_or_default()
}

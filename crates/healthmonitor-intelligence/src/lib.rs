// ABOUTME: Food order health analysis engine for nutrition normalization and risk evaluation
// ABOUTME: Pure pipeline of normalizer, aggregator, rule engine, score calculator, and order stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

#![deny(unsafe_code)]

//! # `HealthMonitor` Intelligence
//!
//! Synchronous, side-effect free analysis of food orders. Data flows strictly
//! forward:
//!
//! ```text
//! RawNutrientRecord -> normalizer -> aggregator -> rule_engine -> health_score
//! ```
//!
//! Nothing here performs I/O. Nutrition lookups and ML collaborator calls live in
//! the service layer, which feeds resolved vectors into [`analyze_order`].

/// Order-level totals and quantity validation
pub mod aggregator;
/// Bounded health score from rule deltas
pub mod health_score;
/// Raw provider nutrient data into canonical vectors
pub mod normalizer;
/// Rolling summary over previously analyzed orders
pub mod order_stats;
/// Composition of the pure stages into one analysis
pub mod pipeline;
/// Threshold, allergy, diet, and condition rules
pub mod rule_engine;

pub use aggregator::{aggregate_totals, validate_order, QuantityPolicy, ValidatedItem, ValidatedOrder};
pub use health_score::{score_from_deltas, ScoreDelta, ScoreReason};
pub use normalizer::{classify, normalize, Normalized, NutrientField, ProviderNutrient, RawNutrientRecord};
pub use order_stats::{summarize_orders, OrderStats};
pub use pipeline::analyze_order;
pub use rule_engine::{RuleConfig, RuleEngine, RuleOutcome};

/// Re-export core error types used across the engine
pub mod errors {
    pub use healthmonitor_core::errors::*;
}

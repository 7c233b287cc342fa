// ABOUTME: Domain service layer orchestrating analysis and collaborator calls
// ABOUTME: Composes the pure intelligence crate with nutrition and ML collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

//! Domain service layer
//!
//! Services hold collaborators behind trait objects so the same business rules
//! apply whether the caller is the CLI, a test, or an embedding application.

/// ML recommendation and risk-assessment fallback
pub mod ml_fallback;

/// Order creation with nutrition resolution and analysis
pub mod order_analysis;

pub use ml_fallback::{fallback_batch, history_window, MlFallbackService};
pub use order_analysis::OrderAnalysisService;

// ABOUTME: Main library entry point for the HealthMonitor food order analysis engine
// ABOUTME: Wires nutrition lookup, order analysis, and ML collaborator fallback together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

#![deny(unsafe_code)]

//! # HealthMonitor
//!
//! Analyzes food orders against a user's health profile. Each order is
//! validated, its items are resolved to per-unit nutrition through a
//! nutrition provider, and the order totals are evaluated by a deterministic
//! rule engine into warnings, recommendations, and a bounded health score.
//!
//! ## Architecture
//!
//! - **Core** (`healthmonitor-core`): models, errors, and constants
//! - **Intelligence** (`healthmonitor-intelligence`): pure normalization,
//!   aggregation, rules, and scoring
//! - **External**: USDA `FoodData Central` and ML service clients
//! - **Services**: order analysis and ML fallback orchestration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use healthmonitor::config::EngineConfig;
//! use healthmonitor::external::MockUsdaClient;
//! use healthmonitor::models::NewOrder;
//! use healthmonitor::services::OrderAnalysisService;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EngineConfig::load()?;
//! let service = OrderAnalysisService::new(Arc::new(MockUsdaClient::new()), config.analysis);
//!
//! let order: NewOrder = serde_json::from_str(
//!     r#"{"restaurant": {"name": "Green Bowl"}, "items": [{"name": "Apple", "externalId": "171688", "quantity": 2}]}"#,
//! )?;
//! let analyzed = service.create_and_analyze(order, None).await?;
//! println!("health score: {}", analyzed.analysis.health_score);
//! # Ok(())
//! # }
//! ```

/// Environment-driven configuration with validation
pub mod config;

/// Unified error handling re-exported from the core crate
pub mod errors;

/// External collaborator clients (USDA, ML service)
pub mod external;

/// Structured logging setup and helpers
pub mod logging;

/// Domain service layer for order analysis and ML fallback
pub mod services;

/// Domain models re-exported from the core crate
pub mod models {
    pub use healthmonitor_core::models::*;
}

/// Application constants re-exported from the core crate
pub mod constants {
    pub use healthmonitor_core::constants::*;
}

/// Pure analysis functions re-exported from the intelligence crate
pub mod intelligence {
    pub use healthmonitor_intelligence::*;
}

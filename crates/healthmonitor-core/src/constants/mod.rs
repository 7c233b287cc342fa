// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Service names, collaborator endpoints, and analysis defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

//! Constants grouped by domain.

/// Service names used in structured logs and error messages
pub mod service_names {
    /// This engine
    pub const HEALTHMONITOR_ENGINE: &str = "healthmonitor-engine";
    /// USDA `FoodData` Central
    pub const USDA_API: &str = "USDA API";
    /// ML recommendation/risk service
    pub const ML_SERVICE: &str = "ML service";
}

/// Collaborator endpoints and defaults
pub mod endpoints {
    /// USDA `FoodData` Central base URL
    pub const USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
    /// Default ML service base URL
    pub const ML_SERVICE_BASE_URL: &str = "http://localhost:5001";
    /// ML recommendation endpoint path
    pub const ML_RECOMMEND_PATH: &str = "recommend";
    /// ML risk assessment endpoint path
    pub const ML_HEALTH_RISK_PATH: &str = "health-risk";
}

/// Health score bounds and baseline
pub mod health_score {
    /// Score every order starts from
    pub const BASELINE: i32 = 70;
    /// Lowest possible score
    pub const MIN: i32 = 0;
    /// Highest possible score
    pub const MAX: i32 = 100;
}

/// Limits applied to ML collaborator requests
pub mod ml_limits {
    /// Newest orders sent with a recommendation request
    pub const RECOMMENDATION_HISTORY_LIMIT: usize = 20;
    /// Newest orders sent with a risk-assessment request
    pub const RISK_HISTORY_LIMIT: usize = 50;
    /// Confidence assigned to every fallback recommendation
    pub const FALLBACK_CONFIDENCE: f64 = 0.5;
    /// Reasoning attached to every fallback recommendation
    pub const FALLBACK_REASONING: &str =
        "Recommendation service unavailable; showing foods in the order provided";
    /// Recommendation type of fallback entries
    pub const FALLBACK_RECOMMENDATION_TYPE: &str = "fallback";
    /// Default number of recommendations
    pub const DEFAULT_RECOMMENDATION_COUNT: usize = 10;
}

/// Order statistics window
pub mod order_stats {
    /// Days covered by the rolling order summary
    pub const WINDOW_DAYS: i64 = 30;
}

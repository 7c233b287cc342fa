// ABOUTME: Engine configuration loaded from environment variables with validation
// ABOUTME: USDA lookup, ML collaborator, and analysis settings with documented defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

//! # Engine Configuration
//!
//! Configuration is environment-only. [`EngineConfig::load`] starts from defaults,
//! applies environment overrides, then validates the result.
//!
//! | Variable | Default |
//! |---|---|
//! | `USDA_API_KEY` | unset (lookups disabled) |
//! | `USDA_API_BASE_URL` | `https://api.nal.usda.gov/fdc/v1` |
//! | `USDA_TIMEOUT_SECS` | 15 |
//! | `USDA_CACHE_TTL_SECS` | 86400 |
//! | `USDA_RATE_LIMIT_PER_MINUTE` | 30 |
//! | `ML_SERVICE_URL` | `http://localhost:5001` |
//! | `ML_SERVICE_TIMEOUT_SECS` | 10 |
//! | `ML_RECOMMENDATION_HISTORY_LIMIT` | 20 (at most 20) |
//! | `ML_RISK_HISTORY_LIMIT` | 50 (at most 50) |
//! | `ANALYSIS_QUANTITY_POLICY` | `reject` |
//! | `ANALYSIS_LOOKUP_CONCURRENCY` | 4 |
//! | `ANALYSIS_LOOKUP_TIMEOUT_SECS` | 15 |
//! | `ANALYSIS_HIGH_CALORIE_THRESHOLD` | 800 |
//! | `ANALYSIS_HIGH_SODIUM_THRESHOLD` | 2000 |
//! | `ANALYSIS_MODERATE_CALORIE_THRESHOLD` | 500 |

/// Configuration error types
pub mod error;

use std::env;
use std::str::FromStr;
use std::time::Duration;

use healthmonitor_core::constants::{endpoints, ml_limits};
use healthmonitor_intelligence::{QuantityPolicy, RuleConfig};
use serde::{Deserialize, Serialize};
use url::Url;

pub use error::ConfigError;

/// Largest accepted lookup concurrency
const MAX_LOOKUP_CONCURRENCY: usize = 64;

/// USDA `FoodData` Central API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsdaApiConfig {
    /// API key; lookups are skipped when absent
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL for USDA `FoodData` Central
    pub base_url: String,
    /// API request timeout (seconds)
    pub timeout_secs: u64,
    /// Cache TTL (seconds)
    pub cache_ttl_secs: u64,
    /// Rate limit: requests per minute
    pub rate_limit_per_minute: u32,
}

impl Default for UsdaApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: endpoints::USDA_BASE_URL.to_owned(),
            timeout_secs: 15,
            cache_ttl_secs: 86_400,
            rate_limit_per_minute: 30,
        }
    }
}

impl UsdaApiConfig {
    /// Whether an API key is configured
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// ML recommendation and risk collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MlServiceConfig {
    /// Base URL of the ML service
    pub base_url: String,
    /// Per-call timeout (seconds)
    pub timeout_secs: u64,
    /// Newest orders sent with a recommendation request
    pub recommendation_history_limit: usize,
    /// Newest orders sent with a risk-assessment request
    pub risk_history_limit: usize,
}

impl Default for MlServiceConfig {
    fn default() -> Self {
        Self {
            base_url: endpoints::ML_SERVICE_BASE_URL.to_owned(),
            timeout_secs: 10,
            recommendation_history_limit: ml_limits::RECOMMENDATION_HISTORY_LIMIT,
            risk_history_limit: ml_limits::RISK_HISTORY_LIMIT,
        }
    }
}

impl MlServiceConfig {
    /// Per-call timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Order analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Treatment of invalid item quantities
    pub quantity_policy: QuantityPolicy,
    /// Nutrition lookups in flight per order
    pub lookup_concurrency: usize,
    /// Per-lookup timeout (seconds)
    pub lookup_timeout_secs: u64,
    /// Rule thresholds and score deltas
    pub rules: RuleConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            quantity_policy: QuantityPolicy::default(),
            lookup_concurrency: 4,
            lookup_timeout_secs: 15,
            rules: RuleConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Per-lookup timeout
    #[must_use]
    pub const fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Nutrition lookup provider
    pub usda: UsdaApiConfig,
    /// ML collaborator
    pub ml_service: MlServiceConfig,
    /// Analysis pipeline
    pub analysis: AnalysisConfig,
}

impl EngineConfig {
    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable holds an unparseable value
    /// or the resulting configuration fails validation
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}: '{val}'")))?;
        }
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // USDA lookup
        if let Ok(key) = env::var("USDA_API_KEY") {
            self.usda.api_key = Some(key).filter(|k| !k.trim().is_empty());
        }
        Self::apply_env_var("USDA_API_BASE_URL", &mut self.usda.base_url)?;
        Self::apply_env_var("USDA_TIMEOUT_SECS", &mut self.usda.timeout_secs)?;
        Self::apply_env_var("USDA_CACHE_TTL_SECS", &mut self.usda.cache_ttl_secs)?;
        Self::apply_env_var(
            "USDA_RATE_LIMIT_PER_MINUTE",
            &mut self.usda.rate_limit_per_minute,
        )?;

        // ML collaborator
        Self::apply_env_var("ML_SERVICE_URL", &mut self.ml_service.base_url)?;
        Self::apply_env_var("ML_SERVICE_TIMEOUT_SECS", &mut self.ml_service.timeout_secs)?;
        Self::apply_env_var(
            "ML_RECOMMENDATION_HISTORY_LIMIT",
            &mut self.ml_service.recommendation_history_limit,
        )?;
        Self::apply_env_var(
            "ML_RISK_HISTORY_LIMIT",
            &mut self.ml_service.risk_history_limit,
        )?;

        // Analysis
        Self::apply_env_var(
            "ANALYSIS_QUANTITY_POLICY",
            &mut self.analysis.quantity_policy,
        )?;
        Self::apply_env_var(
            "ANALYSIS_LOOKUP_CONCURRENCY",
            &mut self.analysis.lookup_concurrency,
        )?;
        Self::apply_env_var(
            "ANALYSIS_LOOKUP_TIMEOUT_SECS",
            &mut self.analysis.lookup_timeout_secs,
        )?;
        Self::apply_env_var(
            "ANALYSIS_HIGH_CALORIE_THRESHOLD",
            &mut self.analysis.rules.high_calorie_threshold,
        )?;
        Self::apply_env_var(
            "ANALYSIS_HIGH_SODIUM_THRESHOLD",
            &mut self.analysis.rules.high_sodium_threshold,
        )?;
        Self::apply_env_var(
            "ANALYSIS_MODERATE_CALORIE_THRESHOLD",
            &mut self.analysis.rules.moderate_calorie_threshold,
        )?;

        Ok(self)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistent or out-of-range value
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_usda()?;
        self.validate_ml_service()?;
        self.validate_analysis()
    }

    fn validate_usda(&self) -> Result<(), ConfigError> {
        Url::parse(&self.usda.base_url)
            .map_err(|e| ConfigError::Parse(format!("Invalid USDA_API_BASE_URL: {e}")))?;
        if self.usda.timeout_secs == 0 {
            return Err(ConfigError::ValueOutOfRange("USDA timeout must be positive"));
        }
        if self.usda.rate_limit_per_minute == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "USDA rate limit must allow at least one request per minute",
            ));
        }
        Ok(())
    }

    fn validate_ml_service(&self) -> Result<(), ConfigError> {
        Url::parse(&self.ml_service.base_url)
            .map_err(|e| ConfigError::Parse(format!("Invalid ML_SERVICE_URL: {e}")))?;
        if self.ml_service.timeout_secs == 0 {
            return Err(ConfigError::ValueOutOfRange("ML service timeout must be positive"));
        }
        if !(1..=ml_limits::RECOMMENDATION_HISTORY_LIMIT)
            .contains(&self.ml_service.recommendation_history_limit)
        {
            return Err(ConfigError::ValueOutOfRange(
                "recommendation history limit must be between 1 and 20",
            ));
        }
        if !(1..=ml_limits::RISK_HISTORY_LIMIT).contains(&self.ml_service.risk_history_limit) {
            return Err(ConfigError::ValueOutOfRange(
                "risk history limit must be between 1 and 50",
            ));
        }
        Ok(())
    }

    fn validate_analysis(&self) -> Result<(), ConfigError> {
        let analysis = &self.analysis;
        if analysis.lookup_concurrency == 0 || analysis.lookup_concurrency > MAX_LOOKUP_CONCURRENCY
        {
            return Err(ConfigError::ValueOutOfRange(
                "lookup concurrency must be between 1 and 64",
            ));
        }
        if analysis.lookup_timeout_secs == 0 {
            return Err(ConfigError::ValueOutOfRange("lookup timeout must be positive"));
        }

        let rules = &analysis.rules;
        let thresholds = [
            rules.high_calorie_threshold,
            rules.high_sodium_threshold,
            rules.moderate_calorie_threshold,
        ];
        if thresholds.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "rule thresholds must be finite and non-negative",
            ));
        }
        if rules.moderate_calorie_threshold > rules.high_calorie_threshold {
            return Err(ConfigError::InvalidRange(
                "moderate calorie threshold must be <= high calorie threshold",
            ));
        }
        Ok(())
    }
}

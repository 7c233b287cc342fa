// ABOUTME: Order submission flow: validation, per-item nutrition resolution, and analysis
// ABOUTME: Lookups run with bounded concurrency and degrade to zero nutrition per item
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use healthmonitor_core::models::{AnalyzedOrder, HealthProfile, NewOrder, NutritionVector};
use healthmonitor_intelligence::{
    analyze_order, normalize, validate_order, RuleEngine, ValidatedItem,
};
use tokio::time::timeout;
use tracing::debug;
use uuid::Uuid;

use crate::config::AnalysisConfig;
use crate::errors::AppResult;
use crate::external::NutritionProvider;
use crate::logging::AppLogger;

/// Creates orders and analyzes them in one step
#[derive(Clone)]
pub struct OrderAnalysisService {
    provider: Arc<dyn NutritionProvider>,
    config: AnalysisConfig,
    engine: RuleEngine,
}

impl OrderAnalysisService {
    /// Build the service around a nutrition provider
    #[must_use]
    pub fn new(provider: Arc<dyn NutritionProvider>, config: AnalysisConfig) -> Self {
        let engine = RuleEngine::new(config.rules.clone());
        Self {
            provider,
            config,
            engine,
        }
    }

    /// Rule engine used for analysis
    #[must_use]
    pub const fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Validate, resolve nutrition for, and analyze a submitted order.
    ///
    /// A failed or timed-out lookup only affects its own item, which then
    /// contributes zero nutrition. The order and its analysis are returned
    /// together or not at all.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the order is malformed
    pub async fn create_and_analyze(
        &self,
        new_order: NewOrder,
        profile: Option<&HealthProfile>,
    ) -> AppResult<AnalyzedOrder> {
        let started = Instant::now();
        let now = Utc::now();
        let validated = validate_order(new_order, self.config.quantity_policy, now)?;

        let nutrition: Vec<NutritionVector> = stream::iter(validated.items.iter())
            .map(|item| self.resolve_item(item))
            .buffered(self.config.lookup_concurrency.max(1))
            .collect()
            .await;

        let order = validated.into_order(nutrition);
        let analysis = analyze_order(&order, profile, &self.engine);
        let id = Uuid::new_v4();

        AppLogger::log_order_analyzed(
            &id.to_string(),
            &order.restaurant.name,
            order.items.len(),
            analysis.warnings.len(),
            analysis.health_score,
            started.elapsed(),
        );

        Ok(AnalyzedOrder {
            id,
            order,
            analysis,
            analyzed_at: now,
        })
    }

    async fn resolve_item(&self, item: &ValidatedItem) -> NutritionVector {
        if let Some(inline) = item.inline_nutrition {
            return inline.sanitized();
        }
        let Some(external_id) = item.external_id.as_deref() else {
            debug!(item = %item.name, "No external id or inline nutrition, using zero");
            return NutritionVector::ZERO;
        };

        match timeout(self.config.lookup_timeout(), self.provider.lookup(external_id)).await {
            Ok(Ok(record)) => {
                let normalized = normalize(&record);
                if !normalized.is_found() {
                    AppLogger::log_lookup_degraded(
                        &item.name,
                        external_id,
                        &format!("not found by {}", self.provider.name()),
                    );
                }
                normalized.unwrap_or_zero()
            }
            Ok(Err(e)) => {
                AppLogger::log_lookup_degraded(&item.name, external_id, &e.to_string());
                NutritionVector::ZERO
            }
            Err(_) => {
                AppLogger::log_lookup_degraded(
                    &item.name,
                    external_id,
                    &format!(
                        "timed out after {}s",
                        self.config.lookup_timeout().as_secs_f64()
                    ),
                );
                NutritionVector::ZERO
            }
        }
    }
}

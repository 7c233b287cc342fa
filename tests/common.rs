// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging, order and profile builders, and scripted collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `healthmonitor`

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use healthmonitor::errors::{AppError, AppResult};
use healthmonitor::external::{MlCollaborator, NutritionProvider};
use healthmonitor::intelligence::{ProviderNutrient, RawNutrientRecord};
use healthmonitor::models::{
    HealthWarning, IndividualRisk, NewOrder, NewOrderItem, OrderInfo, OrderSnapshot,
    OverallAssessment, PersistedAnalysis, RecommendationRequest, RecommendationResponse,
    Restaurant, RiskAssessment, RiskAssessmentRequest,
};
use serde_json::{json, Map};
use tokio::time::sleep;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Order item with an external id
pub fn lookup_item(name: &str, external_id: &str, quantity: f64) -> NewOrderItem {
    NewOrderItem {
        name: name.to_owned(),
        external_id: Some(external_id.to_owned()),
        quantity: Some(quantity),
        ..NewOrderItem::default()
    }
}

/// Order from the given items at a named restaurant
pub fn new_order(items: Vec<NewOrderItem>) -> NewOrder {
    NewOrder {
        restaurant: Some(Restaurant {
            name: "Green Bowl".to_owned(),
            cuisine: Some("Salads".to_owned()),
            location: None,
        }),
        items,
        ..NewOrder::default()
    }
}

/// Persisted history entry placed `days_ago` before `now`
pub fn snapshot(
    restaurant: &str,
    now: DateTime<Utc>,
    days_ago: i64,
    calories: f64,
    health_score: u8,
    warnings: Vec<HealthWarning>,
) -> OrderSnapshot {
    OrderSnapshot {
        order_info: OrderInfo {
            restaurant: Restaurant {
                name: restaurant.to_owned(),
                cuisine: None,
                location: None,
            },
            order_date: now - ChronoDuration::days(days_ago),
        },
        analysis: PersistedAnalysis {
            total_calories: calories,
            total_protein: 0.0,
            total_carbs: 0.0,
            total_fat: 0.0,
            total_sodium: 0.0,
            warnings,
            health_score,
            recommendations: Vec::new(),
        },
    }
}

/// How a scripted provider answers one external id
#[derive(Clone)]
pub enum ProviderScript {
    /// Return these nutrients
    Nutrients(Vec<(&'static str, f64)>),
    /// Fail with an upstream error
    Fail,
    /// Sleep before answering with these nutrients
    Slow(Duration, Vec<(&'static str, f64)>),
}

/// Nutrition provider answering from a fixed script
#[derive(Default)]
pub struct ScriptedProvider {
    scripts: HashMap<String, ProviderScript>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, external_id: &str, script: ProviderScript) -> Self {
        self.scripts.insert(external_id.to_owned(), script);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn record(nutrients: &[(&str, f64)]) -> RawNutrientRecord {
    RawNutrientRecord::Provider(
        nutrients
            .iter()
            .map(|(name, amount)| ProviderNutrient::new(*name, *amount))
            .collect(),
    )
}

#[async_trait]
impl NutritionProvider for ScriptedProvider {
    async fn lookup(&self, external_id: &str) -> AppResult<RawNutrientRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.scripts.get(external_id) {
            Some(ProviderScript::Nutrients(nutrients)) => Ok(record(nutrients)),
            Some(ProviderScript::Fail) => Err(AppError::external_service(
                "scripted",
                "upstream returned 500",
            )),
            Some(ProviderScript::Slow(delay, nutrients)) => {
                sleep(*delay).await;
                Ok(record(nutrients))
            }
            None => Ok(RawNutrientRecord::NotFound),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// How a scripted ML collaborator behaves
#[derive(Clone)]
pub enum MlBehavior {
    /// Answer immediately
    Answer,
    /// Fail with an upstream error
    Fail,
    /// Never answer within any reasonable timeout
    Hang,
}

/// ML collaborator that records requests and answers per its behavior
pub struct ScriptedMl {
    behavior: MlBehavior,
    pub last_recommendation: Mutex<Option<RecommendationRequest>>,
    pub last_risk: Mutex<Option<RiskAssessmentRequest>>,
}

impl ScriptedMl {
    pub const fn new(behavior: MlBehavior) -> Self {
        Self {
            behavior,
            last_recommendation: Mutex::new(None),
            last_risk: Mutex::new(None),
        }
    }

    async fn gate(&self) -> AppResult<()> {
        match self.behavior {
            MlBehavior::Answer => Ok(()),
            MlBehavior::Fail => Err(AppError::external_service(
                "ML service",
                "HTTP 500: Failed to generate recommendations",
            )),
            MlBehavior::Hang => {
                sleep(Duration::from_secs(3600)).await;
                Ok(())
            }
        }
    }
}

/// Assessment the scripted collaborator returns
pub fn sample_assessment() -> RiskAssessment {
    let mut individual_risks = BTreeMap::new();
    individual_risks.insert(
        "hypertension".to_owned(),
        IndividualRisk {
            risk_level: "medium".to_owned(),
            probability: 0.42,
            factors: vec!["High sodium intake".to_owned()],
            extra: Map::new(),
        },
    );

    RiskAssessment {
        individual_risks,
        overall_assessment: OverallAssessment {
            risk_category: "medium".to_owned(),
            health_status: "fair".to_owned(),
            overall_risk_score: 0.42,
            extra: Map::new(),
        },
        priority_actions: Vec::new(),
        extra: Map::new(),
    }
}

#[async_trait]
impl MlCollaborator for ScriptedMl {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> AppResult<RecommendationResponse> {
        *self.last_recommendation.lock().unwrap() = Some(request.clone());
        self.gate().await?;

        // Echo candidates in reverse so pass-through is distinguishable from fallback
        let recommendations = request
            .available_foods
            .iter()
            .rev()
            .take(request.n_recommendations)
            .map(|food| {
                serde_json::from_value(json!({
                    "food": food,
                    "confidence_score": 0.9,
                    "health_score": 0.8,
                    "reasoning": "Matches your preferences",
                    "recommendation_type": "ml_powered"
                }))
                .unwrap()
            })
            .collect::<Vec<_>>();

        // Reports every candidate it scored, not just the returned slice
        Ok(RecommendationResponse {
            total_found: request.available_foods.len(),
            recommendations,
            model_status: "trained".to_owned(),
        })
    }

    async fn assess_risk(&self, request: &RiskAssessmentRequest) -> AppResult<RiskAssessment> {
        *self.last_risk.lock().unwrap() = Some(request.clone());
        self.gate().await?;
        Ok(sample_assessment())
    }
}

// ABOUTME: Integration tests for the ML collaborator fallback layer
// ABOUTME: Covers pass-through, failure and timeout fallback, risk unavailability, and history windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use chrono::Utc;
use common::{init_test_logging, sample_assessment, snapshot, MlBehavior, ScriptedMl};
use healthmonitor::config::MlServiceConfig;
use healthmonitor::models::{
    BatchStatus, ChronicCondition, ConditionSeverity, HealthProfile, RiskOutcome,
};
use healthmonitor::services::{history_window, MlFallbackService};
use serde_json::{json, Value};

fn service(behavior: MlBehavior) -> (Arc<ScriptedMl>, MlFallbackService) {
    init_test_logging();
    let ml = Arc::new(ScriptedMl::new(behavior));
    let config = MlServiceConfig {
        timeout_secs: 1,
        ..MlServiceConfig::default()
    };
    (ml.clone(), MlFallbackService::new(ml, config))
}

fn candidates() -> Vec<Value> {
    ["Lentil Soup", "Grilled Salmon", "Quinoa Bowl", "Veggie Wrap"]
        .iter()
        .map(|name| json!({ "name": name }))
        .collect()
}

#[tokio::test]
async fn test_model_recommendations_pass_through() {
    let (_, service) = service(MlBehavior::Answer);

    let batch = service
        .recommend("user-1", None, &[], candidates(), 2)
        .await;

    assert_eq!(batch.status, BatchStatus::Model("trained".to_owned()));
    assert_eq!(batch.recommendations.len(), 2);
    assert_eq!(batch.total_found, 4);
    assert_eq!(batch.recommendations[0].food["name"], "Veggie Wrap");
    assert_eq!(batch.recommendations[0].recommendation_type, "ml_powered");
}

#[tokio::test]
async fn test_failure_falls_back_to_candidate_prefix() {
    let (_, service) = service(MlBehavior::Fail);

    let batch = service
        .recommend("user-1", None, &[], candidates(), 3)
        .await;

    assert!(batch.status.is_fallback());
    assert_eq!(batch.status.label(), "fallback");
    let names: Vec<&str> = batch
        .recommendations
        .iter()
        .map(|r| r.food["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Lentil Soup", "Grilled Salmon", "Quinoa Bowl"]);
    assert!(batch.recommendations.iter().all(|r| {
        (r.confidence_score - 0.5).abs() < f64::EPSILON
            && r.recommendation_type == "fallback"
            && r.health_score.is_none()
    }));
}

#[tokio::test]
async fn test_fallback_with_fewer_candidates_than_requested() {
    let (_, service) = service(MlBehavior::Fail);

    let batch = service
        .recommend("user-1", None, &[], candidates(), 10)
        .await;

    assert_eq!(batch.recommendations.len(), 4);
    assert_eq!(batch.total_found, 4);
}

#[tokio::test]
async fn test_hanging_collaborator_times_out_into_fallback() {
    let (_, service) = service(MlBehavior::Hang);

    let batch = service
        .recommend("user-1", None, &[], candidates(), 1)
        .await;

    assert!(batch.status.is_fallback());
    assert_eq!(batch.recommendations.len(), 1);
}

#[tokio::test]
async fn test_risk_failure_is_unavailable() {
    let (_, service) = service(MlBehavior::Fail);

    let outcome = service.assess_risk("user-1", None, &[]).await;

    assert!(!outcome.is_available());
    let RiskOutcome::Unavailable { reason } = outcome else {
        panic!("expected unavailable outcome");
    };
    assert!(reason.contains("Failed to generate recommendations"));
}

#[tokio::test]
async fn test_risk_timeout_is_unavailable() {
    let (_, service) = service(MlBehavior::Hang);

    let outcome = service.assess_risk("user-1", None, &[]).await;

    assert!(matches!(outcome, RiskOutcome::Unavailable { .. }));
}

#[tokio::test]
async fn test_risk_assessment_passes_through() {
    let (_, service) = service(MlBehavior::Answer);

    let outcome = service.assess_risk("user-1", None, &[]).await;

    assert_eq!(
        outcome,
        RiskOutcome::Assessed {
            assessment: sample_assessment()
        }
    );
}

#[tokio::test]
async fn test_recommendation_history_is_newest_first_and_bounded() {
    let (ml, service) = service(MlBehavior::Answer);
    let now = Utc::now();
    let history: Vec<_> = (0..25)
        .map(|day| snapshot(&format!("Place {day}"), now, day, 600.0, 70, Vec::new()))
        .rev()
        .collect();

    service
        .recommend("user-1", None, &history, candidates(), 1)
        .await;

    let request = ml.last_recommendation.lock().unwrap().clone().unwrap();
    assert_eq!(request.order_history.len(), 20);
    assert_eq!(request.order_history[0].order_info.restaurant.name, "Place 0");
    assert_eq!(request.order_history[19].order_info.restaurant.name, "Place 19");
    assert_eq!(request.health_profile, json!({}));
}

#[tokio::test]
async fn test_risk_history_window_and_profile_snapshot() {
    let (ml, service) = service(MlBehavior::Answer);
    let now = Utc::now();
    let history: Vec<_> = (0..60)
        .map(|day| snapshot("Diner", now, day, 900.0, 50, Vec::new()))
        .collect();
    let profile = HealthProfile {
        chronic_conditions: vec![ChronicCondition {
            condition: "Hypertension".to_owned(),
            severity: Some(ConditionSeverity::Moderate),
        }],
        ..HealthProfile::default()
    };

    service.assess_risk("user-7", Some(&profile), &history).await;

    let request = ml.last_risk.lock().unwrap().clone().unwrap();
    assert_eq!(request.user_id, "user-7");
    assert_eq!(request.order_history.len(), 50);
    assert_eq!(request.health_profile, serde_json::to_value(&profile).unwrap());
}

#[tokio::test]
async fn test_oversized_history_limits_are_capped() {
    init_test_logging();
    let ml = Arc::new(ScriptedMl::new(MlBehavior::Answer));
    let config = MlServiceConfig {
        recommendation_history_limit: 500,
        risk_history_limit: 1000,
        ..MlServiceConfig::default()
    };
    let service = MlFallbackService::new(ml.clone(), config);
    let now = Utc::now();
    let history: Vec<_> = (0..120)
        .map(|day| snapshot("Diner", now, day, 700.0, 60, Vec::new()))
        .collect();

    service
        .recommend("user-1", None, &history, candidates(), 1)
        .await;
    service.assess_risk("user-1", None, &history).await;

    let recommendation = ml.last_recommendation.lock().unwrap().clone().unwrap();
    let risk = ml.last_risk.lock().unwrap().clone().unwrap();
    assert_eq!(recommendation.order_history.len(), 20);
    assert_eq!(risk.order_history.len(), 50);
}

#[test]
fn test_history_window_sorts_before_truncating() {
    let now = Utc::now();
    let history = vec![
        snapshot("Old", now, 10, 500.0, 70, Vec::new()),
        snapshot("New", now, 1, 500.0, 70, Vec::new()),
        snapshot("Middle", now, 5, 500.0, 70, Vec::new()),
    ];

    let window = history_window(&history, 2);

    let names: Vec<&str> = window
        .iter()
        .map(|s| s.order_info.restaurant.name.as_str())
        .collect();
    assert_eq!(names, ["New", "Middle"]);
}

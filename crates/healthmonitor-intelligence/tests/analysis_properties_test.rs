// ABOUTME: End-to-end properties of the pure analysis pipeline
// ABOUTME: Score arithmetic, profile-dependent rules, purity, and clamping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::Utc;
use healthmonitor_core::models::{
    Allergy, ChronicCondition, DietType, FoodItem, HealthProfile, NutritionVector, Order,
    OrderSource, Restaurant, WarningSeverity, WarningType,
};
use healthmonitor_intelligence::{
    analyze_order, normalize, ProviderNutrient, RawNutrientRecord, RuleEngine,
};

fn item(name: &str, calories: f64, sodium: f64, ingredients: &[&str]) -> FoodItem {
    FoodItem {
        name: name.to_owned(),
        external_id: None,
        quantity: 1.0,
        ingredients: ingredients.iter().map(|s| (*s).to_owned()).collect(),
        nutrition_per_unit: NutritionVector {
            calories,
            sodium,
            ..NutritionVector::ZERO
        },
    }
}

fn order(items: Vec<FoodItem>) -> Order {
    Order {
        restaurant: Restaurant {
            name: "Corner Deli".to_owned(),
            cuisine: Some("American".to_owned()),
            location: None,
        },
        order_date: Utc::now(),
        source: OrderSource::Manual,
        items,
        notes: None,
    }
}

#[test]
fn test_no_profile_means_no_profile_warnings() {
    let order = order(vec![item(
        "Peanut Chicken Satay",
        450.0,
        300.0,
        &["peanut sauce"],
    )]);

    let result = analyze_order(&order, None, &RuleEngine::default());

    assert!(!result.has_warning(WarningType::Allergy));
    assert!(!result.has_warning(WarningType::DietaryRestriction));
}

#[test]
fn test_high_calorie_order_scores_sixty() {
    let order = order(vec![item("Double Burger", 850.0, 500.0, &[])]);

    let result = analyze_order(&order, None, &RuleEngine::default());

    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].warning_type, WarningType::HighCalorie);
    assert_eq!(result.warnings[0].severity, WarningSeverity::Medium);
    assert_eq!(result.health_score, 60);
}

#[test]
fn test_light_order_scores_eighty() {
    let order = order(vec![item("Garden Salad", 300.0, 200.0, &[])]);

    let result = analyze_order(&order, None, &RuleEngine::default());

    assert!(!result.has_warning(WarningType::HighCalorie));
    assert!(!result.has_warning(WarningType::HighSodium));
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(result.health_score, 80);
}

#[test]
fn test_peanut_allergy_is_one_critical_warning() {
    let profile = HealthProfile {
        allergies: vec![Allergy::new("peanut")],
        ..HealthProfile::default()
    };
    let order = order(vec![item(
        "Peanut Butter Sandwich",
        600.0,
        400.0,
        &["peanut butter", "crushed peanuts"],
    )]);

    let result = analyze_order(&order, Some(&profile), &RuleEngine::default());

    assert_eq!(result.count_warnings(WarningType::Allergy), 1);
    let warning = &result.warnings[0];
    assert_eq!(warning.severity, WarningSeverity::Critical);
    assert_eq!(result.health_score, 40);
}

#[test]
fn test_vegetarian_conflict() {
    let profile = HealthProfile {
        diet_type: Some(DietType::Vegetarian),
        ..HealthProfile::default()
    };
    let order = order(vec![item("Grilled Chicken Salad", 600.0, 400.0, &[])]);

    let result = analyze_order(&order, Some(&profile), &RuleEngine::default());

    assert_eq!(result.count_warnings(WarningType::DietaryRestriction), 1);
    assert_eq!(result.health_score, 55);
}

#[test]
fn test_hypertension_profile_leaves_score_at_baseline() {
    let profile = HealthProfile {
        chronic_conditions: vec![ChronicCondition {
            condition: "Hypertension".to_owned(),
            severity: None,
        }],
        ..HealthProfile::default()
    };
    let order = order(vec![item("Miso Ramen", 600.0, 1600.0, &[])]);

    let result = analyze_order(&order, Some(&profile), &RuleEngine::default());

    assert!(result.warnings.is_empty());
    assert_eq!(result.health_score, 70);
}

#[test]
fn test_analysis_is_pure() {
    let profile = HealthProfile {
        allergies: vec![Allergy::new("shrimp")],
        diet_type: Some(DietType::Vegetarian),
        ..HealthProfile::default()
    };
    let order = order(vec![
        item("Shrimp Pad Thai", 900.0, 1800.0, &["shrimp", "rice noodles"]),
        item("Fish Tacos", 500.0, 700.0, &[]),
    ]);
    let engine = RuleEngine::default();

    let first = analyze_order(&order, Some(&profile), &engine);
    let second = analyze_order(&order, Some(&profile), &engine);

    assert_eq!(first, second);
}

#[test]
fn test_score_clamps_at_zero() {
    let profile = HealthProfile {
        allergies: vec![Allergy::new("milk")],
        ..HealthProfile::default()
    };
    let items = (0..4)
        .map(|i| item(&format!("Milkshake {i}"), 700.0, 600.0, &[]))
        .collect();

    let result = analyze_order(&order(items), Some(&profile), &RuleEngine::default());

    assert_eq!(result.count_warnings(WarningType::Allergy), 4);
    assert_eq!(result.health_score, 0);
}

#[test]
fn test_normalized_provider_record_feeds_analysis() {
    let record = RawNutrientRecord::Provider(vec![
        ProviderNutrient::new("Energy", 200.0),
        ProviderNutrient::new("Protein", 10.0),
    ]);
    let mut food = item("Lentil Soup", 0.0, 0.0, &[]);
    food.nutrition_per_unit = normalize(&record).unwrap_or_zero();
    food.quantity = 2.0;

    let result = analyze_order(&order(vec![food]), None, &RuleEngine::default());

    assert!((result.totals.calories - 400.0).abs() < f64::EPSILON);
    assert!((result.totals.protein - 20.0).abs() < f64::EPSILON);
    assert!(result.totals.sodium.abs() < f64::EPSILON);
    assert_eq!(result.health_score, 80);
}

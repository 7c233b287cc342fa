// ABOUTME: Criterion benchmarks for the order analysis pipeline
// ABOUTME: Measures normalization, rule evaluation, and order statistics over growing inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

//! Criterion benchmarks for order analysis.
//!
//! Measures provider record normalization, full order analysis with and
//! without a health profile, and the rolling order summary.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use healthmonitor::intelligence::{
    analyze_order, normalize, summarize_orders, ProviderNutrient, RawNutrientRecord, RuleEngine,
};
use healthmonitor::models::{
    Allergy, ChronicCondition, ConditionSeverity, DietType, FoodItem, HealthProfile,
    NutritionVector, Order, OrderInfo, OrderSnapshot, OrderSource, PersistedAnalysis, Restaurant,
};

const ITEM_NAMES: [&str; 6] = [
    "Chicken Burrito",
    "Garden Salad",
    "Peanut Noodles",
    "Beef Pho",
    "Veggie Pizza",
    "Shrimp Tacos",
];

fn generate_order(count: usize) -> Order {
    let items = (0..count)
        .map(|index| FoodItem {
            name: ITEM_NAMES[index % ITEM_NAMES.len()].to_owned(),
            external_id: Some(format!("{}", 170_000 + index)),
            quantity: 1.0 + (index % 3) as f64,
            ingredients: vec!["rice".to_owned(), "peanut oil".to_owned(), "salt".to_owned()],
            nutrition_per_unit: NutritionVector {
                calories: 150.0 + ((index * 37) % 400) as f64,
                protein: 10.0,
                carbs: 30.0,
                fat: 8.0,
                sodium: 200.0 + ((index * 53) % 600) as f64,
                ..NutritionVector::ZERO
            },
        })
        .collect();

    Order {
        restaurant: Restaurant {
            name: "Benchmark Bistro".to_owned(),
            cuisine: None,
            location: None,
        },
        order_date: Utc::now(),
        source: OrderSource::Manual,
        items,
        notes: None,
    }
}

fn full_profile() -> HealthProfile {
    HealthProfile {
        allergies: vec![Allergy::new("peanut"), Allergy::new("shellfish")],
        diet_type: Some(DietType::Vegetarian),
        chronic_conditions: vec![ChronicCondition {
            condition: "Hypertension".to_owned(),
            severity: Some(ConditionSeverity::Moderate),
        }],
    }
}

fn provider_record() -> RawNutrientRecord {
    RawNutrientRecord::Provider(vec![
        ProviderNutrient::new("Protein", 25.09),
        ProviderNutrient::new("Total lipid (fat)", 50.39),
        ProviderNutrient::new("Carbohydrate, by difference", 19.56),
        ProviderNutrient::new("Energy", 588.0),
        ProviderNutrient::new("Energy", 2460.0),
        ProviderNutrient::new("Fiber, total dietary", 6.0),
        ProviderNutrient::new("Sugars, total including NLEA", 9.22),
        ProviderNutrient::new("Sodium, Na", 459.0),
        ProviderNutrient::new("Cholesterol", 0.0),
        ProviderNutrient::new("Vitamin C, total ascorbic acid", 0.0),
    ])
}

fn bench_normalize(c: &mut Criterion) {
    let record = provider_record();
    c.bench_function("normalize_provider_record", |b| {
        b.iter(|| normalize(black_box(&record)));
    });
}

fn bench_analyze_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_order");
    let engine = RuleEngine::default();
    let profile = full_profile();

    for count in [1_usize, 10, 100] {
        let order = generate_order(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("no_profile", count), &order, |b, order| {
            b.iter(|| analyze_order(black_box(order), None, &engine));
        });
        group.bench_with_input(BenchmarkId::new("with_profile", count), &order, |b, order| {
            b.iter(|| analyze_order(black_box(order), Some(&profile), &engine));
        });
    }

    group.finish();
}

fn bench_order_stats(c: &mut Criterion) {
    let now = Utc::now();
    let history: Vec<OrderSnapshot> = (0..365_i64)
        .map(|day| OrderSnapshot {
            order_info: OrderInfo {
                restaurant: Restaurant::default(),
                order_date: now - Duration::days(day),
            },
            analysis: PersistedAnalysis {
                total_calories: 400.0 + (day % 7) as f64 * 100.0,
                total_protein: 20.0,
                total_carbs: 50.0,
                total_fat: 15.0,
                total_sodium: 900.0,
                warnings: Vec::new(),
                health_score: 70,
                recommendations: Vec::new(),
            },
        })
        .collect();

    c.bench_function("summarize_orders_one_year", |b| {
        b.iter(|| summarize_orders(black_box(&history), now));
    });
}

criterion_group!(benches, bench_normalize, bench_analyze_order, bench_order_stats);
criterion_main!(benches);

// ABOUTME: Rolling 30-day summary over previously analyzed orders
// ABOUTME: Order count, average calories per order, warning count, and average health score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use chrono::{DateTime, Duration, Utc};
use healthmonitor_core::constants::order_stats::WINDOW_DAYS;
use healthmonitor_core::models::OrderSnapshot;
use serde::{Deserialize, Serialize};

/// Summary of orders placed within the window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    /// Orders in the window
    pub total_orders: usize,
    /// Mean calories per order, rounded
    pub avg_calories_per_order: u64,
    /// Warnings across all orders in the window
    pub total_warnings: usize,
    /// Mean health score, rounded
    pub avg_health_score: u8,
}

/// Summarize orders dated within the last 30 days of `now`
#[must_use]
pub fn summarize_orders(orders: &[OrderSnapshot], now: DateTime<Utc>) -> OrderStats {
    let since = now - Duration::days(WINDOW_DAYS);
    let recent: Vec<&OrderSnapshot> = orders
        .iter()
        .filter(|o| o.order_info.order_date >= since)
        .collect();

    if recent.is_empty() {
        return OrderStats::default();
    }

    let count = recent.len() as f64;
    let total_calories: f64 = recent
        .iter()
        .map(|o| o.analysis.total_calories.max(0.0))
        .sum();
    let total_score: f64 = recent
        .iter()
        .map(|o| f64::from(o.analysis.health_score.min(100)))
        .sum();

    OrderStats {
        total_orders: recent.len(),
        avg_calories_per_order: (total_calories / count).round() as u64,
        total_warnings: recent.iter().map(|o| o.analysis.warnings.len()).sum(),
        avg_health_score: (total_score / count).round() as u8,
    }
}

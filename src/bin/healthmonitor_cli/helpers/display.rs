// ABOUTME: Output formatting helpers for healthmonitor-cli
// ABOUTME: Writes pretty JSON to stdout and a short human summary to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use std::io::{self, Write};

use healthmonitor::errors::{AppError, AppResult};
use healthmonitor::models::AnalyzedOrder;
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")
        .map_err(|e| AppError::internal(format!("Failed to write output: {e}")))
}

/// Print a one-screen summary of an analysis on stderr
pub fn print_analysis_summary(analyzed: &AnalyzedOrder) {
    let analysis = &analyzed.analysis;
    eprintln!(
        "{} ({} items): score {}/100, {:.0} kcal, {:.0} mg sodium",
        analyzed.order.restaurant.name,
        analyzed.order.items.len(),
        analysis.health_score,
        analysis.totals.calories,
        analysis.totals.sodium
    );
    for warning in &analysis.warnings {
        eprintln!("  [{:?}] {}", warning.severity, warning.message);
    }
    for recommendation in &analysis.recommendations {
        eprintln!("  + {recommendation}");
    }
}

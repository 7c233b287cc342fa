// ABOUTME: JSON argument loading for healthmonitor-cli
// ABOUTME: Arguments are inline JSON or @path references to JSON files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use std::fs;

use healthmonitor::errors::{AppError, AppResult};
use healthmonitor::models::{AnalyzedOrder, HealthProfile, OrderSnapshot};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Parse a JSON argument given inline or as `@path`
pub fn load_json<T: DeserializeOwned>(arg: &str, what: &str) -> AppResult<T> {
    let text = match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| AppError::invalid_input(format!("Cannot read {what} from {path}: {e}")))?,
        None => arg.to_owned(),
    };

    serde_json::from_str(&text)
        .map_err(|e| AppError::invalid_format(format!("Invalid {what} JSON: {e}")))
}

/// Parse an optional health profile argument
pub fn load_profile(arg: Option<&str>) -> AppResult<Option<HealthProfile>> {
    arg.map(|a| load_json(a, "health profile")).transpose()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryEntry {
    Snapshot(OrderSnapshot),
    Analyzed(Box<AnalyzedOrder>),
}

/// Parse an order history given as snapshots or as `analyze` output
pub fn load_history(arg: Option<&str>) -> AppResult<Vec<OrderSnapshot>> {
    let Some(arg) = arg else {
        return Ok(Vec::new());
    };
    let entries: Vec<HistoryEntry> = load_json(arg, "order history")?;

    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            HistoryEntry::Snapshot(snapshot) => snapshot,
            HistoryEntry::Analyzed(analyzed) => OrderSnapshot::from(analyzed.as_ref()),
        })
        .collect())
}

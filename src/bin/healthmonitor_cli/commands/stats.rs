// ABOUTME: Order statistics command for healthmonitor-cli
// ABOUTME: Summarizes the last 30 days of an order history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use chrono::Utc;
use healthmonitor::errors::AppResult;
use healthmonitor::intelligence::summarize_orders;

use crate::helpers::display::print_json;
use crate::helpers::input::load_history;

/// Print the rolling order summary
pub fn run(orders: &str) -> AppResult<()> {
    let history = load_history(Some(orders))?;
    print_json(&summarize_orders(&history, Utc::now()))
}

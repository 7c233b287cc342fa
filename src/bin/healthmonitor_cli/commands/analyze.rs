// ABOUTME: Order analysis command for healthmonitor-cli
// ABOUTME: Resolves nutrition through USDA (or the offline catalog) and prints the analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use std::sync::Arc;

use healthmonitor::config::EngineConfig;
use healthmonitor::errors::AppResult;
use healthmonitor::external::{MockUsdaClient, NutritionProvider, UsdaClient};
use healthmonitor::models::NewOrder;
use healthmonitor::services::OrderAnalysisService;
use tracing::{info, warn};

use crate::helpers::display::{print_analysis_summary, print_json};
use crate::helpers::input::{load_json, load_profile};

/// Analyze one order and print the analyzed order as JSON
pub async fn run(
    config: EngineConfig,
    order: &str,
    profile: Option<&str>,
    offline: bool,
    summary: bool,
) -> AppResult<()> {
    let new_order: NewOrder = load_json(order, "order")?;
    let profile = load_profile(profile)?;

    let provider: Arc<dyn NutritionProvider> = if offline {
        info!("Using offline nutrition catalog");
        Arc::new(MockUsdaClient::new())
    } else {
        if !config.usda.is_configured() {
            warn!("USDA_API_KEY is not set; items without inline nutrition will count as zero");
        }
        Arc::new(UsdaClient::new(config.usda)?)
    };

    let service = OrderAnalysisService::new(provider, config.analysis);
    let analyzed = service
        .create_and_analyze(new_order, profile.as_ref())
        .await?;

    if summary {
        print_analysis_summary(&analyzed);
    }
    print_json(&analyzed)
}

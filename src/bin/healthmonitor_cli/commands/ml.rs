// ABOUTME: ML collaborator commands for healthmonitor-cli
// ABOUTME: Food recommendations and health-risk assessment with graceful fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use std::sync::Arc;

use healthmonitor::config::MlServiceConfig;
use healthmonitor::errors::AppResult;
use healthmonitor::external::MlServiceClient;
use healthmonitor::services::MlFallbackService;
use serde_json::Value;

use crate::helpers::display::print_json;
use crate::helpers::input::{load_history, load_json, load_profile};

/// Arguments shared by the ML commands
pub struct MlArgs<'a> {
    /// User the request is for
    pub user_id: &'a str,
    /// Health profile JSON or `@path`
    pub profile: Option<&'a str>,
    /// Order history JSON or `@path`
    pub history: Option<&'a str>,
}

fn fallback_service(config: MlServiceConfig) -> AppResult<MlFallbackService> {
    let client = MlServiceClient::new(&config)?;
    Ok(MlFallbackService::new(Arc::new(client), config))
}

/// Request recommendations for the supplied candidate foods
pub async fn recommend(
    config: MlServiceConfig,
    args: MlArgs<'_>,
    candidates: &str,
    count: usize,
) -> AppResult<()> {
    let candidates: Vec<Value> = load_json(candidates, "candidate foods")?;
    let profile = load_profile(args.profile)?;
    let history = load_history(args.history)?;

    let service = fallback_service(config)?;
    let batch = service
        .recommend(args.user_id, profile.as_ref(), &history, candidates, count)
        .await;

    print_json(&batch)
}

/// Request a health-risk assessment
pub async fn assess_risk(config: MlServiceConfig, args: MlArgs<'_>) -> AppResult<()> {
    let profile = load_profile(args.profile)?;
    let history = load_history(args.history)?;

    let service = fallback_service(config)?;
    let outcome = service
        .assess_risk(args.user_id, profile.as_ref(), &history)
        .await;

    print_json(&outcome)
}

// ABOUTME: HealthMonitor CLI - command-line front end for the food order analysis engine
// ABOUTME: Analyzes orders, requests ML recommendations and risk assessments, and summarizes history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors
//!
//! JSON arguments may be given inline or as `@path`. Results are printed as
//! JSON on stdout; logs go to stderr.
//!
//! Usage:
//! ```bash
//! # Analyze an order using the USDA API (USDA_API_KEY must be set)
//! healthmonitor-cli analyze --order @order.json --profile @profile.json
//!
//! # Analyze against the built-in offline catalog
//! healthmonitor-cli analyze --order @order.json --offline --summary
//!
//! # Ask the ML service for recommendations (falls back when unavailable)
//! healthmonitor-cli recommend --candidates @foods.json --history @orders.json --count 5
//!
//! # Ask the ML service for a health-risk assessment
//! healthmonitor-cli assess-risk --history @orders.json --profile @profile.json
//!
//! # Summarize the last 30 days of orders
//! healthmonitor-cli stats --orders @orders.json
//! ```

mod commands;
mod helpers;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use healthmonitor::config::EngineConfig;
use healthmonitor::constants::ml_limits::DEFAULT_RECOMMENDATION_COUNT;
use healthmonitor::errors::{AppError, AppResult};
use healthmonitor::logging::LoggingConfig;
use tracing::error;

use commands::ml::MlArgs;

#[derive(Parser)]
#[command(
    name = "healthmonitor-cli",
    about = "HealthMonitor food order analysis CLI",
    long_about = "Analyze food orders for health concerns, and query the ML recommendation and risk services."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Validate and analyze one order
    Analyze {
        /// Order JSON or @path
        #[arg(long)]
        order: String,

        /// Health profile JSON or @path
        #[arg(long)]
        profile: Option<String>,

        /// Resolve nutrition from the built-in catalog instead of USDA
        #[arg(long)]
        offline: bool,

        /// Also print a human-readable summary on stderr
        #[arg(long)]
        summary: bool,
    },

    /// Request food recommendations from the ML service
    Recommend {
        /// Candidate foods JSON array or @path
        #[arg(long)]
        candidates: String,

        /// Order history JSON array or @path
        #[arg(long)]
        history: Option<String>,

        /// Health profile JSON or @path
        #[arg(long)]
        profile: Option<String>,

        /// Number of recommendations
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_COUNT)]
        count: usize,

        /// User identifier sent to the service
        #[arg(long, default_value = "cli-user")]
        user_id: String,
    },

    /// Request a health-risk assessment from the ML service
    AssessRisk {
        /// Order history JSON array or @path
        #[arg(long)]
        history: Option<String>,

        /// Health profile JSON or @path
        #[arg(long)]
        profile: Option<String>,

        /// User identifier sent to the service
        #[arg(long, default_value = "cli-user")]
        user_id: String,
    },

    /// Summarize orders from the last 30 days
    Stats {
        /// Order history JSON array or @path
        #[arg(long)]
        orders: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = ?e.code, "{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> AppResult<()> {
    let config = EngineConfig::load().map_err(AppError::from)?;

    match command {
        Command::Analyze {
            order,
            profile,
            offline,
            summary,
        } => commands::analyze::run(config, &order, profile.as_deref(), offline, summary).await,
        Command::Recommend {
            candidates,
            history,
            profile,
            count,
            user_id,
        } => {
            let args = MlArgs {
                user_id: &user_id,
                profile: profile.as_deref(),
                history: history.as_deref(),
            };
            commands::ml::recommend(config.ml_service, args, &candidates, count).await
        }
        Command::AssessRisk {
            history,
            profile,
            user_id,
        } => {
            let args = MlArgs {
                user_id: &user_id,
                profile: profile.as_deref(),
                history: history.as_deref(),
            };
            commands::ml::assess_risk(config.ml_service, args).await
        }
        Command::Stats { orders } => commands::stats::run(&orders),
    }
}

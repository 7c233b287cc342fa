// ABOUTME: Re-exports command modules for healthmonitor-cli
// ABOUTME: Provides order analysis, ML collaborator, and statistics commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

pub mod analyze;
pub mod ml;
pub mod stats;

// ABOUTME: Re-exports helper modules for healthmonitor-cli
// ABOUTME: Provides JSON argument loading and output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

pub mod display;
pub mod input;

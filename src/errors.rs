// ABOUTME: Error handling for the HealthMonitor engine, re-exported from healthmonitor-core
// ABOUTME: AppError, ErrorCode, and AppResult shared by every layer of the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

//! # Unified Error Handling System
//!
//! The error types live in `healthmonitor-core` so the pure engine and the
//! service layer share one taxonomy.

pub use healthmonitor_core::errors::*;

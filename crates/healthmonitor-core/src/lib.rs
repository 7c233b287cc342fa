// ABOUTME: Core types and constants for the HealthMonitor food order analysis platform
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

#![deny(unsafe_code)]

//! # `HealthMonitor` Core
//!
//! Foundation crate shared by the analysis engine and the service layer. It
//! changes rarely, so keeping it separate speeds up incremental builds.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Service names, endpoints, and analysis defaults
//! - **models**: Orders, nutrition vectors, health profiles, analysis results

/// Unified error handling system with standard error codes and HTTP status mapping
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;

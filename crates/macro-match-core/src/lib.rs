// ABOUTME: Core types and constants for the macro-match recipe engine
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macro Match Core
//!
//! Foundation crate providing shared types and constants for the recipe
//! matching engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Engine-wide defaults (serving bounds, limits, energy densities)
//! - **models**: Recipe corpus rows, match requests, and scaled recommendations

/// Unified error handling system with standard error codes
pub mod errors;

/// Engine constants organized by concern
pub mod constants;

/// Core data models (Recipe, `MatchRequest`, `ScaledRecommendation`)
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};

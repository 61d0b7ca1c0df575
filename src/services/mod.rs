// ABOUTME: Domain service layer orchestrating corpus reads and the matching engine
// ABOUTME: Protocol-agnostic so the CLI and any future transport share the same rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Recipe matching for one slot or a whole day
pub mod matching;

pub use matching::{DayRequest, RecipeMatchingService, SlotRecommendation, SlotRequest};

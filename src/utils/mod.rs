// ABOUTME: Utility modules shared across the orchestrator, normalizers, and proxy
// ABOUTME: Contains lenient serde helpers for loosely-typed upstream JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Lenient deserializers for numbers, strings, and string lists
pub mod serde_loose;

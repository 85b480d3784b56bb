// ABOUTME: Parses free-text cook times like "1 hour 30 minutes" or "45 min" into minutes
// ABOUTME: Hour and minute components are summed; a bare number is minutes; default is 30
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::recipe_defaults::DEFAULT_COOK_MINUTES;

static HOURS_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*h").ok());
static MINUTES_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*m").ok());
static NUMBER_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(\d+)").ok());

fn capture_f64(pattern: &LazyLock<Option<Regex>>, text: &str) -> Option<f64> {
    pattern
        .as_ref()?
        .captures(text)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Minutes in a free-text duration
///
/// Handles `"1 hour 30 minutes"` (90), `"45 min"` (45), `"1h"` (60),
/// `"1.5 hours"` (90), and a bare `"45"` (45). Empty, missing, or
/// non-numeric input yields the 30 minute default, as does a total of zero.
#[must_use]
pub fn parse_cook_time(raw: Option<&str>) -> u32 {
    let Some(text) = raw.map(str::to_lowercase) else {
        return DEFAULT_COOK_MINUTES;
    };

    let hours = capture_f64(&HOURS_PATTERN, &text).unwrap_or(0.0);
    let minutes = capture_f64(&MINUTES_PATTERN, &text).unwrap_or(0.0);
    let mut total = hours.mul_add(60.0, minutes);

    if total <= 0.0 {
        total = capture_f64(&NUMBER_PATTERN, &text).unwrap_or(0.0);
    }

    if total.is_finite() && total >= 1.0 {
        total.round().min(f64::from(u32::MAX)) as u32
    } else {
        DEFAULT_COOK_MINUTES
    }
}

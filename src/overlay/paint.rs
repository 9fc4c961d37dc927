// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Utilization paint tables.

pub const COLOR_NEUTRAL: &str = "#b0bec5";
pub const COLOR_GREEN: &str = "#2ecc71";
pub const COLOR_YELLOW_GREEN: &str = "#9acd32";
pub const COLOR_YELLOW: &str = "#f1c40f";
pub const COLOR_ORANGE: &str = "#e67e22";
pub const COLOR_RED: &str = "#e74c3c";
pub const COLOR_DARK_RED: &str = "#7b241c";
pub const COLOR_DOWN: &str = "#d32f2f";
pub const COLOR_UP: &str = "#2e7d32";

/// Fixed step table from utilization percent to stroke color. Values above
/// 100% saturate into the last bucket.
pub fn utilization_color(percent: f64) -> &'static str {
    if percent <= 0.0 {
        COLOR_NEUTRAL
    } else if percent <= 1.0 {
        COLOR_GREEN
    } else if percent <= 25.0 {
        COLOR_YELLOW_GREEN
    } else if percent <= 50.0 {
        COLOR_YELLOW
    } else if percent <= 75.0 {
        COLOR_ORANGE
    } else if percent <= 90.0 {
        COLOR_RED
    } else {
        COLOR_DARK_RED
    }
}

const PERIOD_MIN_SECS: f64 = 0.4;
const PERIOD_MAX_SECS: f64 = 3.0;
const PERIOD_BASE_SECS: f64 = 12.0;

/// Seconds per dash cycle for the flow stroke. Busier links flow faster:
/// the period shrinks with `log10(bps + 1)`, clamped to a sane range.
pub fn flow_period_secs(bps: f64) -> f64 {
    let magnitude = (bps.max(0.0) + 1.0).log10();
    (PERIOD_BASE_SECS / (magnitude + 1.0)).clamp(PERIOD_MIN_SECS, PERIOD_MAX_SECS)
}

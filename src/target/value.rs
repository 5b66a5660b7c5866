//! Progress values derived from a target tracker's entry history.
//!
//! Both functions expect only the entries dated on or after the tracker's start
//! date, ordered newest first, which is what `get_entries_since` returns.

use crate::entries::data::Entry;

/// The stored parameters of a target tracker that progress depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSettings {
    pub start_value: f64,
    pub goal_value: f64,
    pub add_to_total: bool,
    pub use_actual_bounds: bool,
}

/// Additive trackers sum every entry onto the start value; replacement trackers
/// take the most recent entry, or the start value when there is none.
pub fn current_value(settings: &TargetSettings, entries: &[Entry]) -> f64 {
    if settings.add_to_total {
        settings.start_value + entries.iter().map(|entry| entry.value).sum::<f64>()
    } else {
        entries
            .first()
            .map_or(settings.start_value, |latest| latest.value)
    }
}

/// With actual bounds on, an increasing target starts from the lowest progress
/// point ever recorded if that undershoots the start value, and a decreasing
/// (or flat) target from the highest if that overshoots it.
pub fn adjusted_start_value(settings: &TargetSettings, entries: &[Entry]) -> f64 {
    if !settings.use_actual_bounds || entries.is_empty() {
        return settings.start_value;
    }

    let points = progress_points(settings, entries);
    let min_value = points.iter().copied().fold(f64::INFINITY, f64::min);
    let max_value = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if settings.start_value < settings.goal_value {
        if min_value < settings.start_value {
            return min_value;
        }
    } else if max_value > settings.start_value {
        return max_value;
    }

    settings.start_value
}

/// One point per entry: the running total after it for additive trackers
/// (oldest first), the raw value otherwise.
fn progress_points(settings: &TargetSettings, entries: &[Entry]) -> Vec<f64> {
    if settings.add_to_total {
        entries
            .iter()
            .rev()
            .scan(settings.start_value, |total, entry| {
                *total += entry.value;
                Some(*total)
            })
            .collect()
    } else {
        entries.iter().map(|entry| entry.value).collect()
    }
}

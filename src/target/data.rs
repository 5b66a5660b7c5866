use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entries::data::Entry;
use crate::internal_error::InternalResult;
use crate::trackers::data::{DueRule, Reminder, TrackerID};
use crate::trackers::dates::parse_tracker_date;
use crate::trackers::due::Scheduled;

use super::value::{adjusted_start_value, current_value, TargetSettings};

/// A numeric goal. `start_value` is what clients see (bounds-adjusted when
/// `use_actual_bounds` is on), `original_start_value` is what was stored, and
/// `current_value` is derived from the entries on every read.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetTracker {
    pub id: TrackerID,
    pub tracker_name: String,
    pub start_value: f64,
    pub original_start_value: f64,
    pub goal_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    pub start_date: DateTime<Utc>,
    pub goal_date: DateTime<Utc>,
    pub add_to_total: bool,
    pub use_actual_bounds: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_weight_type: Option<String>,
    pub due: DueRule,
    pub reminders: Reminder,
    pub created_at: DateTime<Utc>,
}

impl TargetTracker {
    pub fn settings(&self) -> TargetSettings {
        TargetSettings {
            start_value: self.original_start_value,
            goal_value: self.goal_value,
            add_to_total: self.add_to_total,
            use_actual_bounds: self.use_actual_bounds,
        }
    }

    /// Fills in the derived values from the tracker's in-window entries.
    pub fn with_progress(mut self, entries: &[Entry]) -> TargetTracker {
        let settings = self.settings();
        self.current_value = Some(current_value(&settings, entries));
        self.start_value = adjusted_start_value(&settings, entries);
        self
    }

    /// Used when the entries could not be loaded: progress sits at the stored start value.
    pub fn without_progress(mut self) -> TargetTracker {
        self.current_value = Some(self.original_start_value);
        self.start_value = self.original_start_value;
        self
    }
}

impl Scheduled for TargetTracker {
    fn start_date(&self) -> NaiveDate {
        self.start_date.date_naive()
    }

    fn due(&self) -> &DueRule {
        &self.due
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateTargetRequest {
    pub tracker_name: String,
    pub start_value: f64,
    pub goal_value: f64,
    pub start_date: String,
    pub goal_date: String,
    #[serde(default)]
    pub add_to_total: bool,
    #[serde(default)]
    pub trend_weight_type: Option<String>,
    pub due: DueRule,
    #[serde(default)]
    pub reminders: Reminder,
}

impl CreateTargetRequest {
    /// New targets always start with actual bounds off.
    pub fn into_tracker(self, created_at: DateTime<Utc>) -> InternalResult<TargetTracker> {
        Ok(TargetTracker {
            id: 0,
            tracker_name: self.tracker_name,
            start_value: self.start_value,
            original_start_value: self.start_value,
            goal_value: self.goal_value,
            current_value: None,
            start_date: parse_tracker_date(&self.start_date, "startDate")?,
            goal_date: parse_tracker_date(&self.goal_date, "goalDate")?,
            add_to_total: self.add_to_total,
            use_actual_bounds: false,
            trend_weight_type: self.trend_weight_type,
            due: self.due,
            reminders: self.reminders.with_default_time(),
            created_at,
        })
    }
}

/// Partial update of a target tracker; absent fields keep their stored value.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetPatch {
    pub tracker_name: Option<String>,
    pub start_value: Option<f64>,
    pub goal_value: Option<f64>,
    pub start_date: Option<String>,
    pub goal_date: Option<String>,
    pub add_to_total: Option<bool>,
    pub use_actual_bounds: Option<bool>,
    pub trend_weight_type: Option<String>,
    pub due: Option<DueRule>,
    pub reminders: Option<Reminder>,
}

impl TargetPatch {
    /// Applies onto a tracker as stored, so `original_start_value` is the base.
    pub fn apply(self, tracker: &mut TargetTracker) -> InternalResult<()> {
        let start_date = match self.start_date {
            Some(text) => Some(parse_tracker_date(&text, "startDate")?),
            None => None,
        };
        let goal_date = match self.goal_date {
            Some(text) => Some(parse_tracker_date(&text, "goalDate")?),
            None => None,
        };

        if let Some(start_date) = start_date {
            tracker.start_date = start_date;
        }
        if let Some(goal_date) = goal_date {
            tracker.goal_date = goal_date;
        }
        if let Some(tracker_name) = self.tracker_name {
            tracker.tracker_name = tracker_name;
        }
        if let Some(start_value) = self.start_value {
            tracker.start_value = start_value;
            tracker.original_start_value = start_value;
        }
        if let Some(goal_value) = self.goal_value {
            tracker.goal_value = goal_value;
        }
        if let Some(add_to_total) = self.add_to_total {
            tracker.add_to_total = add_to_total;
        }
        if let Some(use_actual_bounds) = self.use_actual_bounds {
            tracker.use_actual_bounds = use_actual_bounds;
        }
        if let Some(trend_weight_type) = self.trend_weight_type {
            tracker.trend_weight_type = Some(trend_weight_type);
        }
        if let Some(due) = self.due {
            tracker.due = due;
        }
        if let Some(reminders) = self.reminders {
            tracker.reminders = reminders;
        }

        Ok(())
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::internal_error::InternalResult;
use crate::trackers::data::{DueRule, Reminder, TimePeriod, TrackerID};
use crate::trackers::dates::parse_tracker_date;
use crate::trackers::due::Scheduled;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HabitTracker {
    pub id: TrackerID,
    pub tracker_name: String,
    pub goal: f64,
    pub time_period: TimePeriod,
    pub start_date: DateTime<Utc>,
    pub due: DueRule,
    pub reminders: Reminder,
    pub bad_habit: bool,
    pub goal_streak: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Scheduled for HabitTracker {
    fn start_date(&self) -> NaiveDate {
        self.start_date.date_naive()
    }

    fn due(&self) -> &DueRule {
        &self.due
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitRequest {
    pub tracker_name: String,
    pub goal: f64,
    pub time_period: TimePeriod,
    pub start_date: String,
    pub due: DueRule,
    #[serde(default)]
    pub reminders: Reminder,
    #[serde(default)]
    pub bad_habit: bool,
    #[serde(default)]
    pub goal_streak: Option<i64>,
}

impl CreateHabitRequest {
    pub fn into_tracker(self, created_at: DateTime<Utc>) -> InternalResult<HabitTracker> {
        Ok(HabitTracker {
            id: 0,
            tracker_name: self.tracker_name,
            goal: self.goal,
            time_period: self.time_period,
            start_date: parse_tracker_date(&self.start_date, "startDate")?,
            due: self.due,
            reminders: self.reminders.with_default_time(),
            bad_habit: self.bad_habit,
            goal_streak: self.goal_streak,
            created_at,
        })
    }
}

/// Partial update of a habit tracker; absent fields keep their stored value.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct HabitPatch {
    pub tracker_name: Option<String>,
    pub goal: Option<f64>,
    pub time_period: Option<TimePeriod>,
    pub start_date: Option<String>,
    pub due: Option<DueRule>,
    pub reminders: Option<Reminder>,
    pub bad_habit: Option<bool>,
    pub goal_streak: Option<i64>,
}

impl HabitPatch {
    pub fn apply(self, tracker: &mut HabitTracker) -> InternalResult<()> {
        if let Some(start_date) = self.start_date {
            tracker.start_date = parse_tracker_date(&start_date, "startDate")?;
        }
        if let Some(tracker_name) = self.tracker_name {
            tracker.tracker_name = tracker_name;
        }
        if let Some(goal) = self.goal {
            tracker.goal = goal;
        }
        if let Some(time_period) = self.time_period {
            tracker.time_period = time_period;
        }
        if let Some(due) = self.due {
            tracker.due = due;
        }
        if let Some(reminders) = self.reminders {
            tracker.reminders = reminders;
        }
        if let Some(bad_habit) = self.bad_habit {
            tracker.bad_habit = bad_habit;
        }
        if let Some(goal_streak) = self.goal_streak {
            tracker.goal_streak = Some(goal_streak);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal_error::InternalError;
    use crate::trackers::data::IntervalUnit;
    use serde_json::json;

    fn request() -> CreateHabitRequest {
        serde_json::from_value(json!({
            "trackerName": "Drink Water",
            "goal": 8,
            "timePeriod": "perDay",
            "startDate": "2024-01-01",
            "due": {"type": "specificDays", "specificDays": ["monday"]},
            "reminders": {"times": [], "enabled": true}
        }))
        .unwrap()
    }

    #[test]
    fn create_request_fills_defaults() {
        let tracker = request().into_tracker(Utc::now()).unwrap();

        assert_eq!(tracker.start_date.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(tracker.reminders.times, vec!["18:00".to_string()]);
        assert!(!tracker.bad_habit);
        assert_eq!(tracker.goal_streak, None);
    }

    #[test]
    fn create_request_rejects_bad_start_date() {
        let mut request = request();
        request.start_date = "01/01/2024".to_string();

        assert!(matches!(
            request.into_tracker(Utc::now()),
            Err(InternalError::BadRequest(_))
        ));
    }

    #[test]
    fn patch_distinguishes_unset_from_false_and_zero() {
        let mut tracker = request().into_tracker(Utc::now()).unwrap();
        tracker.bad_habit = true;

        let patch: HabitPatch = serde_json::from_value(json!({
            "goal": 0,
            "due": {"type": "interval", "intervalType": "week", "intervalValue": 2}
        }))
        .unwrap();
        patch.apply(&mut tracker).unwrap();

        assert_eq!(tracker.goal, 0.0);
        assert!(tracker.bad_habit);
        assert_eq!(tracker.tracker_name, "Drink Water");
        assert_eq!(tracker.due, DueRule::every(2, IntervalUnit::Week));
    }

    #[test]
    fn failed_patch_leaves_tracker_untouched() {
        let mut tracker = request().into_tracker(Utc::now()).unwrap();
        let before = tracker.clone();

        let patch = HabitPatch {
            tracker_name: Some("Renamed".to_string()),
            start_date: Some("tomorrow".to_string()),
            ..HabitPatch::default()
        };

        assert!(patch.apply(&mut tracker).is_err());
        assert_eq!(tracker, before);
    }
}

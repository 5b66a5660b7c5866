use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::internal_error::{InternalError, InternalResult};
use crate::trackers::data::{TrackerID, TrackerType};
use crate::trackers::dates::parse_entry_date;

pub type EntryID = i64;

/// A dated log line against one tracker. Habit entries carry `done`, target
/// entries carry `value`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryID,
    pub tracker_id: TrackerID,
    #[serde(rename = "type")]
    pub tracker_type: TrackerType,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn non_empty(note: Option<String>) -> Option<String> {
    note.filter(|n| !n.is_empty())
}

fn entry_date(date: Option<String>, now: DateTime<Local>) -> InternalResult<DateTime<Utc>> {
    match date.filter(|d| !d.is_empty()) {
        Some(text) => parse_entry_date(&text, now).ok_or_else(|| {
            InternalError::bad_request(
                "Invalid date format. Use YYYY-MM-DD or RFC3339 (2006-01-02T15:04:05Z07:00)",
            )
        }),
        None => Ok(now.with_timezone(&Utc)),
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AddEntryRequest {
    pub value: Option<f64>,
    pub done: Option<bool>,
    pub date: Option<String>,
    pub note: Option<String>,
}

impl AddEntryRequest {
    /// Builds an unsaved entry (id 0). Habit entries default to done, target
    /// entries to a value of zero, and the date to `now`.
    pub fn into_entry(
        self,
        tracker_id: TrackerID,
        tracker_type: TrackerType,
        now: DateTime<Local>,
    ) -> InternalResult<Entry> {
        let (value, done) = match tracker_type {
            TrackerType::Habit => (0.0, Some(self.done.unwrap_or(true))),
            TrackerType::Target => (self.value.unwrap_or(0.0), None),
        };

        Ok(Entry {
            id: 0,
            tracker_id,
            tracker_type,
            value,
            done,
            date: entry_date(self.date, now)?,
            note: non_empty(self.note),
            created_at: now.with_timezone(&Utc),
        })
    }
}

/// Partial update of an entry; absent fields keep their stored value.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryPatch {
    pub value: Option<f64>,
    pub done: Option<bool>,
    pub date: Option<String>,
    pub note: Option<String>,
}

impl EntryPatch {
    pub fn apply(self, entry: &mut Entry, now: DateTime<Local>) -> InternalResult<()> {
        match entry.tracker_type {
            TrackerType::Habit => {
                if let Some(done) = self.done {
                    entry.done = Some(done);
                }
            }
            TrackerType::Target => {
                if let Some(value) = self.value {
                    entry.value = value;
                }
            }
        }
        if let Some(date) = self.date {
            entry.date = entry_date(Some(date), now)?;
        }
        if let Some(note) = self.note {
            entry.note = non_empty(Some(note));
        }

        Ok(())
    }
}

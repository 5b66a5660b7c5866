use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

pub type TrackerID = i64;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrackerType {
    Habit,
    Target,
}

impl TrackerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerType::Habit => "habit",
            TrackerType::Target => "target",
        }
    }
}

impl ToSql for TrackerType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TrackerType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "habit" => Ok(TrackerType::Habit),
            "target" => Ok(TrackerType::Target),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimePeriod {
    PerDay,
    PerWeek,
    PerMonth,
    PerYear,
}

impl TimePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::PerDay => "perDay",
            TimePeriod::PerWeek => "perWeek",
            TimePeriod::PerMonth => "perMonth",
            TimePeriod::PerYear => "perYear",
        }
    }
}

impl ToSql for TimePeriod {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TimePeriod {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "perDay" => Ok(TimePeriod::PerDay),
            "perWeek" => Ok(TimePeriod::PerWeek),
            "perMonth" => Ok(TimePeriod::PerMonth),
            "perYear" => Ok(TimePeriod::PerYear),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// Which branch of a `DueRule` is active. Unknown strings are kept as-is so
/// they survive a round trip through storage; they are never due.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum DueKind {
    SpecificDays,
    Interval,
    Unrecognized(String),
}

impl From<String> for DueKind {
    fn from(s: String) -> DueKind {
        match s.as_str() {
            "specificDays" => DueKind::SpecificDays,
            "interval" => DueKind::Interval,
            _ => DueKind::Unrecognized(s),
        }
    }
}

impl From<DueKind> for String {
    fn from(kind: DueKind) -> String {
        match kind {
            DueKind::SpecificDays => "specificDays".to_string(),
            DueKind::Interval => "interval".to_string(),
            DueKind::Unrecognized(s) => s,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum IntervalUnit {
    Day,
    Week,
    Month,
    Year,
    Unrecognized(String),
}

impl From<String> for IntervalUnit {
    fn from(s: String) -> IntervalUnit {
        match s.as_str() {
            "day" => IntervalUnit::Day,
            "week" => IntervalUnit::Week,
            "month" => IntervalUnit::Month,
            "year" => IntervalUnit::Year,
            _ => IntervalUnit::Unrecognized(s),
        }
    }
}

impl From<IntervalUnit> for String {
    fn from(unit: IntervalUnit) -> String {
        match unit {
            IntervalUnit::Day => "day".to_string(),
            IntervalUnit::Week => "week".to_string(),
            IntervalUnit::Month => "month".to_string(),
            IntervalUnit::Year => "year".to_string(),
            IntervalUnit::Unrecognized(s) => s,
        }
    }
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// When a tracker shows up on the dashboard. Only the fields of the branch
/// selected by `kind` are looked at.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DueRule {
    #[serde(rename = "type")]
    pub kind: DueKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specific_days: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_type: Option<IntervalUnit>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub interval_value: i64,
}

#[cfg(test)]
impl DueRule {
    pub fn specific_days(days: &[&str]) -> DueRule {
        DueRule {
            kind: DueKind::SpecificDays,
            specific_days: days.iter().map(|day| day.to_string()).collect(),
            interval_type: None,
            interval_value: 0,
        }
    }

    pub fn every(interval_value: i64, unit: IntervalUnit) -> DueRule {
        DueRule {
            kind: DueKind::Interval,
            specific_days: vec![],
            interval_type: Some(unit),
            interval_value,
        }
    }
}

pub const DEFAULT_REMINDER_TIME: &str = "18:00";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Reminder {
    pub times: Vec<String>,
    pub enabled: bool,
}

impl Reminder {
    /// An enabled reminder without any times gets the default evening slot.
    pub fn with_default_time(self) -> Reminder {
        if self.enabled && self.times.is_empty() {
            Reminder {
                times: vec![DEFAULT_REMINDER_TIME.to_string()],
                enabled: true,
            }
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn due_rule_reads_wire_shape() {
        let rule: DueRule = serde_json::from_value(json!({
            "type": "interval",
            "intervalType": "day",
            "intervalValue": 3
        }))
        .unwrap();

        assert_eq!(rule, DueRule::every(3, IntervalUnit::Day));
    }

    #[test]
    fn unknown_kinds_survive_serialization() {
        let rule: DueRule = serde_json::from_value(json!({
            "type": "lunar",
            "intervalType": "fortnight",
            "intervalValue": 2
        }))
        .unwrap();

        assert_eq!(rule.kind, DueKind::Unrecognized("lunar".to_string()));
        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({"type": "lunar", "intervalType": "fortnight", "intervalValue": 2})
        );
    }

    #[test]
    fn specific_days_rule_omits_interval_fields() {
        let rule = DueRule::specific_days(&["monday", "friday"]);

        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({"type": "specificDays", "specificDays": ["monday", "friday"]})
        );
    }

    #[test]
    fn enabled_reminder_without_times_gets_default() {
        let reminder = Reminder {
            times: vec![],
            enabled: true,
        }
        .with_default_time();
        assert_eq!(reminder.times, vec!["18:00".to_string()]);

        let disabled = Reminder::default().with_default_time();
        assert!(disabled.times.is_empty());
    }

    #[test]
    fn time_period_uses_camel_case() {
        assert_eq!(
            serde_json::to_value(TimePeriod::PerWeek).unwrap(),
            json!("perWeek")
        );
    }
}

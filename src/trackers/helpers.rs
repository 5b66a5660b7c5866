use rusqlite::types::Type;
use rusqlite::Row;
use tracing::warn;

use super::data::{DueKind, DueRule, IntervalUnit, Reminder};
use crate::internal_error::InternalResult;

/// Columns shared by both tracker tables, in the order they appear in every SELECT.
pub const DUE_COLUMNS: &str =
    "due_type, due_specific_days, due_interval_type, due_interval_value, reminder_times, reminder_enabled";

pub fn string_list_from_row(row: &Row, idx: usize) -> rusqlite::Result<Vec<String>> {
    match row.get::<usize, Option<String>>(idx)? {
        Some(text) if !text.is_empty() => serde_json::from_str::<Option<Vec<String>>>(&text)
            .map(|list| list.unwrap_or_default())
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
        _ => Ok(vec![]),
    }
}

pub fn string_list_to_column(list: &[String]) -> InternalResult<String> {
    Ok(serde_json::to_string(list)?)
}

/// Keeps the rows that decode and logs the rest, so one corrupt tracker does not hide the others.
pub fn readable_rows<T>(rows: impl Iterator<Item = rusqlite::Result<T>>) -> Vec<T> {
    rows.filter_map(|row| match row {
        Ok(tracker) => Some(tracker),
        Err(e) => {
            warn!(error = %e, "skipping unreadable tracker");
            None
        }
    })
    .collect()
}

/// Reads `DUE_COLUMNS` starting at column `first`.
pub fn due_and_reminder_from_row(row: &Row, first: usize) -> rusqlite::Result<(DueRule, Reminder)> {
    let kind = DueKind::from(row.get::<usize, String>(first)?);
    let specific_days = string_list_from_row(row, first + 1)?;
    let interval_type = row
        .get::<usize, Option<String>>(first + 2)?
        .filter(|unit| !unit.is_empty())
        .map(IntervalUnit::from);
    let interval_value = row.get::<usize, Option<i64>>(first + 3)?.unwrap_or(0);

    let times = string_list_from_row(row, first + 4)?;
    let enabled = row.get::<usize, Option<bool>>(first + 5)?.unwrap_or(true);

    Ok((
        DueRule {
            kind,
            specific_days,
            interval_type,
            interval_value,
        },
        Reminder { times, enabled },
    ))
}

/// The values written to `DUE_COLUMNS`.
pub struct DueColumns {
    pub kind: String,
    pub specific_days: String,
    pub interval_type: Option<String>,
    pub interval_value: i64,
    pub reminder_times: String,
    pub reminder_enabled: bool,
}

impl DueColumns {
    pub fn new(due: &DueRule, reminders: &Reminder) -> InternalResult<DueColumns> {
        Ok(DueColumns {
            kind: String::from(due.kind.clone()),
            specific_days: string_list_to_column(&due.specific_days)?,
            interval_type: due.interval_type.clone().map(String::from),
            interval_value: due.interval_value,
            reminder_times: string_list_to_column(&reminders.times)?,
            reminder_enabled: reminders.enabled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::{params, Connection};

    #[test]
    fn due_columns_round_trip_through_sqlite() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute(
                &format!("CREATE TABLE t ({})", DUE_COLUMNS),
                params![],
            )
            .unwrap();

        let due = DueRule::specific_days(&["monday", "thursday"]);
        let reminders = Reminder {
            times: vec!["07:30".to_string()],
            enabled: false,
        };
        let columns = DueColumns::new(&due, &reminders).unwrap();
        connection
            .execute(
                "INSERT INTO t VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    columns.kind,
                    columns.specific_days,
                    columns.interval_type,
                    columns.interval_value,
                    columns.reminder_times,
                    columns.reminder_enabled
                ],
            )
            .unwrap();

        let (read_due, read_reminders) = connection
            .query_row(&format!("SELECT {} FROM t", DUE_COLUMNS), params![], |row| {
                due_and_reminder_from_row(row, 0)
            })
            .unwrap();

        assert_eq!(read_due, due);
        assert_eq!(read_reminders, reminders);
    }

    #[test]
    fn null_and_empty_lists_read_as_empty() {
        let connection = Connection::open_in_memory().unwrap();

        let lists: (Vec<String>, Vec<String>, Vec<String>) = connection
            .query_row("SELECT NULL, '', 'null'", params![], |row| {
                Ok((
                    string_list_from_row(row, 0)?,
                    string_list_from_row(row, 1)?,
                    string_list_from_row(row, 2)?,
                ))
            })
            .unwrap();

        assert_eq!(lists, (vec![], vec![], vec![]));
    }
}

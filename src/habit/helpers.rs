use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use tracing::info;

use crate::entries::helpers::delete_tracker_entries;
use crate::internal_error::{InternalError, InternalResult};
use crate::trackers::data::{TimePeriod, TrackerID, TrackerType};
use crate::trackers::helpers::{due_and_reminder_from_row, readable_rows, DueColumns, DUE_COLUMNS};

use super::data::*;

fn select_habits(filter: &str) -> String {
    format!(
        "SELECT id, tracker_name, goal, time_period, start_date, bad_habit, goal_streak, created_at, {}
         FROM habit_trackers {}",
        DUE_COLUMNS, filter
    )
}

pub fn habit_from_row(row: &Row) -> rusqlite::Result<HabitTracker> {
    let (due, reminders) = due_and_reminder_from_row(row, 8)?;

    Ok(HabitTracker {
        id: row.get::<usize, TrackerID>(0)?,
        tracker_name: row.get::<usize, String>(1)?,
        goal: row.get::<usize, f64>(2)?,
        time_period: row.get::<usize, TimePeriod>(3)?,
        start_date: row.get::<usize, DateTime<Utc>>(4)?,
        bad_habit: row.get::<usize, Option<bool>>(5)?.unwrap_or(false),
        goal_streak: row.get::<usize, Option<i64>>(6)?,
        created_at: row.get::<usize, DateTime<Utc>>(7)?,
        due,
        reminders,
    })
}

pub fn add_habit_to_db(
    mut habit: HabitTracker,
    db_connection: &Connection,
) -> InternalResult<HabitTracker> {
    let due = DueColumns::new(&habit.due, &habit.reminders)?;

    db_connection.execute(
        "INSERT INTO habit_trackers (
            tracker_name, goal, time_period, start_date, bad_habit, goal_streak, created_at,
            due_type, due_specific_days, due_interval_type, due_interval_value,
            reminder_times, reminder_enabled
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            habit.tracker_name,
            habit.goal,
            habit.time_period,
            habit.start_date,
            habit.bad_habit,
            habit.goal_streak,
            habit.created_at,
            due.kind,
            due.specific_days,
            due.interval_type,
            due.interval_value,
            due.reminder_times,
            due.reminder_enabled
        ],
    )?;
    habit.id = db_connection.last_insert_rowid();
    info!(tracker_id = habit.id, name = %habit.tracker_name, "habit tracker created");

    Ok(habit)
}

pub fn get_all_habits_from_db(db_connection: &Connection) -> InternalResult<Vec<HabitTracker>> {
    let mut statement = db_connection.prepare(&select_habits("ORDER BY created_at DESC, id DESC"))?;
    let habits = statement
        .query_map(params![], habit_from_row)?
        .collect::<rusqlite::Result<Vec<HabitTracker>>>()?;

    Ok(habits)
}

/// Like `get_all_habits_from_db`, but rows that fail to decode are skipped.
pub fn get_readable_habits_from_db(db_connection: &Connection) -> InternalResult<Vec<HabitTracker>> {
    let mut statement = db_connection.prepare(&select_habits("ORDER BY created_at DESC, id DESC"))?;
    let habits = readable_rows(statement.query_map(params![], habit_from_row)?);

    Ok(habits)
}

pub fn get_habit_from_db(
    tracker_id: TrackerID,
    db_connection: &Connection,
) -> InternalResult<HabitTracker> {
    let mut statement = db_connection.prepare(&select_habits("WHERE id = (?1)"))?;
    let mut rows = statement.query_map(params![tracker_id], habit_from_row)?;

    match rows.next() {
        Some(habit) => Ok(habit?),
        None => Err(InternalError::not_found("Habit tracker not found")),
    }
}

pub fn update_habit_in_db(habit: &HabitTracker, db_connection: &Connection) -> InternalResult<()> {
    let due = DueColumns::new(&habit.due, &habit.reminders)?;

    db_connection.execute(
        "UPDATE habit_trackers SET
            tracker_name = ?1, goal = ?2, time_period = ?3, start_date = ?4,
            bad_habit = ?5, goal_streak = ?6,
            due_type = ?7, due_specific_days = ?8, due_interval_type = ?9, due_interval_value = ?10,
            reminder_times = ?11, reminder_enabled = ?12
        WHERE id = ?13",
        params![
            habit.tracker_name,
            habit.goal,
            habit.time_period,
            habit.start_date,
            habit.bad_habit,
            habit.goal_streak,
            due.kind,
            due.specific_days,
            due.interval_type,
            due.interval_value,
            due.reminder_times,
            due.reminder_enabled,
            habit.id
        ],
    )?;

    Ok(())
}

/// Removes the tracker and its entries together, or neither.
pub fn delete_habit_from_db(
    tracker_id: TrackerID,
    db_connection: &mut Connection,
) -> InternalResult<()> {
    let transaction = db_connection.transaction()?;

    let entries = delete_tracker_entries(tracker_id, TrackerType::Habit, &transaction)?;
    transaction.execute(
        "DELETE FROM habit_trackers WHERE id = (?1)",
        params![tracker_id],
    )?;

    transaction.commit()?;
    info!(tracker_id, entries, "habit tracker deleted");

    Ok(())
}

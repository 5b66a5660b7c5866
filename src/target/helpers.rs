use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use tracing::{info, warn};

use crate::entries::helpers::{delete_tracker_entries, get_entries_since};
use crate::internal_error::{InternalError, InternalResult};
use crate::trackers::data::{TrackerID, TrackerType};
use crate::trackers::helpers::{due_and_reminder_from_row, readable_rows, DueColumns, DUE_COLUMNS};

use super::data::*;

fn select_targets(filter: &str) -> String {
    format!(
        "SELECT id, tracker_name, start_value, goal_value, start_date, goal_date,
                add_to_total, use_actual_bounds, trend_weight_type, created_at, {}
         FROM target_trackers {}",
        DUE_COLUMNS, filter
    )
}

pub fn target_from_row(row: &Row) -> rusqlite::Result<TargetTracker> {
    let (due, reminders) = due_and_reminder_from_row(row, 10)?;
    let start_value = row.get::<usize, f64>(2)?;

    Ok(TargetTracker {
        id: row.get::<usize, TrackerID>(0)?,
        tracker_name: row.get::<usize, String>(1)?,
        start_value,
        original_start_value: start_value,
        goal_value: row.get::<usize, f64>(3)?,
        current_value: None,
        start_date: row.get::<usize, DateTime<Utc>>(4)?,
        goal_date: row.get::<usize, DateTime<Utc>>(5)?,
        add_to_total: row.get::<usize, Option<bool>>(6)?.unwrap_or(false),
        use_actual_bounds: row.get::<usize, Option<bool>>(7)?.unwrap_or(false),
        trend_weight_type: row.get::<usize, Option<String>>(8)?,
        created_at: row.get::<usize, DateTime<Utc>>(9)?,
        due,
        reminders,
    })
}

pub fn add_target_to_db(
    mut target: TargetTracker,
    db_connection: &Connection,
) -> InternalResult<TargetTracker> {
    let due = DueColumns::new(&target.due, &target.reminders)?;

    db_connection.execute(
        "INSERT INTO target_trackers (
            tracker_name, start_value, goal_value, start_date, goal_date,
            add_to_total, use_actual_bounds, trend_weight_type, created_at,
            due_type, due_specific_days, due_interval_type, due_interval_value,
            reminder_times, reminder_enabled
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            target.tracker_name,
            target.original_start_value,
            target.goal_value,
            target.start_date,
            target.goal_date,
            target.add_to_total,
            target.use_actual_bounds,
            target.trend_weight_type,
            target.created_at,
            due.kind,
            due.specific_days,
            due.interval_type,
            due.interval_value,
            due.reminder_times,
            due.reminder_enabled
        ],
    )?;
    target.id = db_connection.last_insert_rowid();
    info!(tracker_id = target.id, name = %target.tracker_name, "target tracker created");

    Ok(target)
}

pub fn get_all_targets_from_db(db_connection: &Connection) -> InternalResult<Vec<TargetTracker>> {
    let mut statement =
        db_connection.prepare(&select_targets("ORDER BY created_at DESC, id DESC"))?;
    let targets = statement
        .query_map(params![], target_from_row)?
        .collect::<rusqlite::Result<Vec<TargetTracker>>>()?;

    Ok(targets)
}

pub fn get_readable_targets_from_db(db_connection: &Connection) -> InternalResult<Vec<TargetTracker>> {
    let mut statement =
        db_connection.prepare(&select_targets("ORDER BY created_at DESC, id DESC"))?;
    let targets = readable_rows(statement.query_map(params![], target_from_row)?);

    Ok(targets)
}

pub fn get_target_from_db(
    tracker_id: TrackerID,
    db_connection: &Connection,
) -> InternalResult<TargetTracker> {
    let mut statement = db_connection.prepare(&select_targets("WHERE id = (?1)"))?;
    let mut rows = statement.query_map(params![tracker_id], target_from_row)?;

    match rows.next() {
        Some(target) => Ok(target?),
        None => Err(InternalError::not_found("Target tracker not found")),
    }
}

pub fn update_target_in_db(
    target: &TargetTracker,
    db_connection: &Connection,
) -> InternalResult<()> {
    let due = DueColumns::new(&target.due, &target.reminders)?;

    db_connection.execute(
        "UPDATE target_trackers SET
            tracker_name = ?1, start_value = ?2, goal_value = ?3, start_date = ?4, goal_date = ?5,
            add_to_total = ?6, use_actual_bounds = ?7, trend_weight_type = ?8,
            due_type = ?9, due_specific_days = ?10, due_interval_type = ?11, due_interval_value = ?12,
            reminder_times = ?13, reminder_enabled = ?14
        WHERE id = ?15",
        params![
            target.tracker_name,
            target.original_start_value,
            target.goal_value,
            target.start_date,
            target.goal_date,
            target.add_to_total,
            target.use_actual_bounds,
            target.trend_weight_type,
            due.kind,
            due.specific_days,
            due.interval_type,
            due.interval_value,
            due.reminder_times,
            due.reminder_enabled,
            target.id
        ],
    )?;

    Ok(())
}

/// Removes the tracker and its entries together, or neither.
pub fn delete_target_from_db(
    tracker_id: TrackerID,
    db_connection: &mut Connection,
) -> InternalResult<()> {
    let transaction = db_connection.transaction()?;

    let entries = delete_tracker_entries(tracker_id, TrackerType::Target, &transaction)?;
    transaction.execute(
        "DELETE FROM target_trackers WHERE id = (?1)",
        params![tracker_id],
    )?;

    transaction.commit()?;
    info!(tracker_id, entries, "target tracker deleted");

    Ok(())
}

/// Computes the derived values of a stored tracker. A failure to load its
/// entries is logged and leaves progress at the stored start value.
pub fn load_progress(target: TargetTracker, db_connection: &Connection) -> TargetTracker {
    match get_entries_since(
        target.id,
        TrackerType::Target,
        target.start_date,
        db_connection,
    ) {
        Ok(entries) => target.with_progress(&entries),
        Err(e) => {
            warn!(tracker_id = target.id, error = %e, "could not load entries, using start value");
            target.without_progress()
        }
    }
}

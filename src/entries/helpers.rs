use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::internal_error::{InternalError, InternalResult};
use crate::trackers::data::{TrackerID, TrackerType};

use super::data::*;

const ENTRY_COLUMNS: &str = "id, tracker_id, type, value, done, date, note, created_at";

pub fn entry_from_row(row: &Row) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get::<usize, EntryID>(0)?,
        tracker_id: row.get::<usize, TrackerID>(1)?,
        tracker_type: row.get::<usize, TrackerType>(2)?,
        value: row.get::<usize, Option<f64>>(3)?.unwrap_or(0.0),
        done: row.get::<usize, Option<bool>>(4)?,
        date: row.get::<usize, DateTime<Utc>>(5)?,
        note: row.get::<usize, Option<String>>(6)?,
        created_at: row.get::<usize, DateTime<Utc>>(7)?,
    })
}

pub fn add_entry_to_db(mut entry: Entry, db_connection: &Connection) -> InternalResult<Entry> {
    db_connection.execute(
        "INSERT INTO entries (tracker_id, type, value, done, date, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            entry.tracker_id,
            entry.tracker_type,
            entry.value,
            entry.done,
            entry.date,
            entry.note,
            entry.created_at
        ],
    )?;
    entry.id = db_connection.last_insert_rowid();
    debug!(entry_id = entry.id, tracker_id = entry.tracker_id, "entry added");

    Ok(entry)
}

pub fn get_entry_from_db(entry_id: EntryID, db_connection: &Connection) -> InternalResult<Entry> {
    let mut statement = db_connection.prepare(&format!(
        "SELECT {} FROM entries WHERE id = (?1)",
        ENTRY_COLUMNS
    ))?;
    let mut rows = statement.query_map(params![entry_id], entry_from_row)?;

    match rows.next() {
        Some(entry) => Ok(entry?),
        None => Err(InternalError::not_found("Entry not found")),
    }
}

pub fn get_all_entries_from_db(db_connection: &Connection) -> InternalResult<Vec<Entry>> {
    let mut statement = db_connection.prepare(&format!(
        "SELECT {} FROM entries ORDER BY created_at DESC, id DESC",
        ENTRY_COLUMNS
    ))?;
    let entries = statement
        .query_map(params![], entry_from_row)?
        .collect::<rusqlite::Result<Vec<Entry>>>()?;

    Ok(entries)
}

/// Entries of one tracker dated on or after `start_date` (compared by calendar
/// day), most recent date first.
pub fn get_entries_since(
    tracker_id: TrackerID,
    tracker_type: TrackerType,
    start_date: DateTime<Utc>,
    db_connection: &Connection,
) -> InternalResult<Vec<Entry>> {
    let mut statement = db_connection.prepare(&format!(
        "SELECT {} FROM entries
         WHERE tracker_id = (?1) AND type = (?2) AND date(date) >= date(?3)
         ORDER BY julianday(date) DESC, id DESC",
        ENTRY_COLUMNS
    ))?;
    let entries = statement
        .query_map(params![tracker_id, tracker_type, start_date], entry_from_row)?
        .collect::<rusqlite::Result<Vec<Entry>>>()?;

    Ok(entries)
}

pub fn update_entry_in_db(entry: &Entry, db_connection: &Connection) -> InternalResult<()> {
    db_connection.execute(
        "UPDATE entries SET value = (?1), done = (?2), date = (?3), note = (?4) WHERE id = (?5)",
        params![entry.value, entry.done, entry.date, entry.note, entry.id],
    )?;

    Ok(())
}

pub fn delete_entry_from_db(entry_id: EntryID, db_connection: &Connection) -> InternalResult<()> {
    let deleted = db_connection.execute("DELETE FROM entries WHERE id = (?1)", params![entry_id])?;

    if deleted == 0 {
        return Err(InternalError::not_found("Entry not found"));
    }

    Ok(())
}

/// Deletes every listed entry or none of them. Unknown ids are skipped.
pub fn delete_entries_from_db(
    entry_ids: &[EntryID],
    db_connection: &mut Connection,
) -> InternalResult<usize> {
    let transaction = db_connection.transaction()?;
    let mut deleted = 0;

    {
        let mut statement = transaction.prepare("DELETE FROM entries WHERE id = (?1)")?;
        for entry_id in entry_ids {
            deleted += statement.execute(params![entry_id])?;
        }
    }

    transaction.commit()?;

    Ok(deleted)
}

pub fn delete_tracker_entries(
    tracker_id: TrackerID,
    tracker_type: TrackerType,
    db_connection: &Connection,
) -> InternalResult<usize> {
    Ok(db_connection.execute(
        "DELETE FROM entries WHERE tracker_id = (?1) AND type = (?2)",
        params![tracker_id, tracker_type],
    )?)
}

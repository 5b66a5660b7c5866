use rusqlite::{params, Connection};
use tracing::info;

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::internal_error::{InternalError, InternalResult};

pub type DBConnection = Arc<Mutex<Connection>>;

const CREATE_HABIT_TRACKERS: &str = "CREATE TABLE IF NOT EXISTS habit_trackers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tracker_name TEXT NOT NULL,
    goal REAL NOT NULL,
    time_period TEXT NOT NULL,
    start_date TEXT NOT NULL,
    due_type TEXT NOT NULL,
    due_specific_days TEXT,
    due_interval_type TEXT,
    due_interval_value INTEGER,
    reminder_times TEXT,
    reminder_enabled INTEGER DEFAULT 1,
    bad_habit INTEGER DEFAULT 0,
    goal_streak INTEGER,
    created_at TEXT NOT NULL
)";

const CREATE_TARGET_TRACKERS: &str = "CREATE TABLE IF NOT EXISTS target_trackers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tracker_name TEXT NOT NULL,
    start_value REAL NOT NULL,
    goal_value REAL NOT NULL,
    start_date TEXT NOT NULL,
    goal_date TEXT NOT NULL,
    add_to_total INTEGER DEFAULT 0,
    use_actual_bounds INTEGER DEFAULT 0,
    trend_weight_type TEXT,
    due_type TEXT NOT NULL,
    due_specific_days TEXT,
    due_interval_type TEXT,
    due_interval_value INTEGER,
    reminder_times TEXT,
    reminder_enabled INTEGER DEFAULT 1,
    created_at TEXT NOT NULL
)";

const CREATE_ENTRIES: &str = "CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tracker_id INTEGER NOT NULL,
    type TEXT NOT NULL,
    value REAL,
    done INTEGER,
    date TEXT NOT NULL,
    note TEXT,
    created_at TEXT NOT NULL
)";

pub fn create_tables(db_connection: &Connection) -> InternalResult<()> {
    for statement in [CREATE_HABIT_TRACKERS, CREATE_TARGET_TRACKERS, CREATE_ENTRIES] {
        db_connection.execute(statement, params![])?;
    }
    db_connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_entries_tracker ON entries (tracker_id, type)",
        params![],
    )?;

    Ok(())
}

pub fn open_database(path: &Path) -> InternalResult<DBConnection> {
    let connection = Connection::open(path)?;
    create_tables(&connection)?;
    info!(path = %path.display(), "database tables created/verified");

    Ok(Arc::new(Mutex::new(connection)))
}

#[cfg(test)]
pub fn open_test_database() -> DBConnection {
    let connection = Connection::open_in_memory().expect("open in-memory database");
    create_tables(&connection).expect("create tables");
    Arc::new(Mutex::new(connection))
}

/// Path ids arrive as `Result` so a non-numeric id is a 400 rather than a fall-through 404.
pub fn parse_id(id: Result<i64, &str>, what: &str) -> InternalResult<i64> {
    id.map_err(|raw| InternalError::bad_request(format!("Invalid {} ID: {}", what, raw)))
}

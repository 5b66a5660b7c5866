use rocket::serde::json::Json;
use rocket::{get, State};
use tracing::debug;

use crate::data::DBConnection;
use crate::habit::helpers::get_readable_habits_from_db;
use crate::internal_error::{InternalError, InternalResult};
use crate::target::helpers::{get_readable_targets_from_db, load_progress};
use crate::trackers::dates::{format_calendar_date, parse_calendar_date, today};
use crate::trackers::due::Scheduled;

use super::data::*;

#[get("/trackers")]
pub fn get_all_trackers(db_connection: &State<DBConnection>) -> InternalResult<Json<TrackersResponse>> {
    let db_connection = db_connection.lock()?;

    let habit_trackers = get_readable_habits_from_db(&db_connection)?;
    let target_trackers = get_readable_targets_from_db(&db_connection)?
        .into_iter()
        .map(|target| load_progress(target, &db_connection))
        .collect();

    Ok(Json(TrackersResponse {
        habit_trackers,
        target_trackers,
    }))
}

/// Trackers due on `date` (local today when absent).
#[get("/dashboard?<date>")]
pub fn get_dashboard(
    date: Option<&str>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<DashboardResponse>> {
    let date = match date {
        Some(text) => parse_calendar_date(text).ok_or_else(|| {
            InternalError::bad_request("Invalid date format. Please use YYYY-MM-DD format")
        })?,
        None => today(),
    };

    let db_connection = db_connection.lock()?;

    let habit_trackers: Vec<_> = get_readable_habits_from_db(&db_connection)?
        .into_iter()
        .filter(|habit| habit.is_due_on(date))
        .collect();
    let target_trackers: Vec<_> = get_readable_targets_from_db(&db_connection)?
        .into_iter()
        .filter(|target| target.is_due_on(date))
        .map(|target| load_progress(target, &db_connection))
        .collect();
    debug!(
        %date,
        habits = habit_trackers.len(),
        targets = target_trackers.len(),
        "dashboard"
    );

    Ok(Json(DashboardResponse {
        date: format_calendar_date(date),
        habit_trackers,
        target_trackers,
    }))
}

use chrono::{Local, Utc};
use rocket::http::Status;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, State};

use crate::data::{parse_id, DBConnection};
use crate::entries::data::{AddEntryRequest, Entry};
use crate::entries::helpers::{add_entry_to_db, get_entries_since};
use crate::internal_error::InternalResult;
use crate::trackers::data::TrackerType;

use super::data::*;
use super::helpers::*;

#[get("/habit-trackers")]
pub fn get_habits(db_connection: &State<DBConnection>) -> InternalResult<Json<Vec<HabitTracker>>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(get_all_habits_from_db(&db_connection)?))
}

#[post("/habit-trackers", format = "json", data = "<request>")]
pub fn create_habit(
    request: Json<CreateHabitRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Created<Json<HabitTracker>>> {
    let habit = request.into_inner().into_tracker(Utc::now())?;
    let db_connection = db_connection.lock()?;

    let created = add_habit_to_db(habit, &db_connection)?;

    Ok(Created::new(format!("/api/habit-trackers/{}", created.id)).body(Json(created)))
}

#[get("/habit-trackers/<tracker_id>")]
pub fn get_habit(
    tracker_id: Result<i64, &str>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<HabitTracker>> {
    let tracker_id = parse_id(tracker_id, "tracker")?;
    let db_connection = db_connection.lock()?;

    Ok(Json(get_habit_from_db(tracker_id, &db_connection)?))
}

#[put("/habit-trackers/<tracker_id>", format = "json", data = "<patch>")]
pub fn update_habit(
    tracker_id: Result<i64, &str>,
    patch: Json<HabitPatch>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<HabitTracker>> {
    let tracker_id = parse_id(tracker_id, "tracker")?;
    let db_connection = db_connection.lock()?;

    let mut habit = get_habit_from_db(tracker_id, &db_connection)?;
    patch.into_inner().apply(&mut habit)?;
    update_habit_in_db(&habit, &db_connection)?;

    Ok(Json(habit))
}

#[delete("/habit-trackers/<tracker_id>")]
pub fn delete_habit(
    tracker_id: Result<i64, &str>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Status> {
    let tracker_id = parse_id(tracker_id, "tracker")?;
    let mut db_connection = db_connection.lock()?;

    delete_habit_from_db(tracker_id, &mut db_connection)?;

    Ok(Status::NoContent)
}

#[post("/habit-trackers/<tracker_id>/entries", format = "json", data = "<request>")]
pub fn add_habit_entry(
    tracker_id: Result<i64, &str>,
    request: Json<AddEntryRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Created<Json<Entry>>> {
    let tracker_id = parse_id(tracker_id, "tracker")?;
    let db_connection = db_connection.lock()?;

    get_habit_from_db(tracker_id, &db_connection)?;
    let entry = request
        .into_inner()
        .into_entry(tracker_id, TrackerType::Habit, Local::now())?;
    let created = add_entry_to_db(entry, &db_connection)?;

    Ok(Created::new(format!("/api/entries/{}", created.id)).body(Json(created)))
}

#[get("/habit-trackers/<tracker_id>/entries")]
pub fn get_habit_entries(
    tracker_id: Result<i64, &str>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<Entry>>> {
    let tracker_id = parse_id(tracker_id, "tracker")?;
    let db_connection = db_connection.lock()?;

    let habit = get_habit_from_db(tracker_id, &db_connection)?;
    let entries = get_entries_since(
        tracker_id,
        TrackerType::Habit,
        habit.start_date,
        &db_connection,
    )?;

    Ok(Json(entries))
}

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

#[get("/target-trackers")]
pub fn get_targets(
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<TargetTracker>>> {
    let db_connection = db_connection.lock()?;

    let targets = get_all_targets_from_db(&db_connection)?
        .into_iter()
        .map(|target| load_progress(target, &db_connection))
        .collect();

    Ok(Json(targets))
}

#[post("/target-trackers", format = "json", data = "<request>")]
pub fn create_target(
    request: Json<CreateTargetRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Created<Json<TargetTracker>>> {
    let target = request.into_inner().into_tracker(Utc::now())?;
    let db_connection = db_connection.lock()?;

    let created = load_progress(add_target_to_db(target, &db_connection)?, &db_connection);

    Ok(Created::new(format!("/api/target-trackers/{}", created.id)).body(Json(created)))
}

#[get("/target-trackers/<tracker_id>")]
pub fn get_target(
    tracker_id: Result<i64, &str>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<TargetTracker>> {
    let tracker_id = parse_id(tracker_id, "tracker")?;
    let db_connection = db_connection.lock()?;

    let target = get_target_from_db(tracker_id, &db_connection)?;

    Ok(Json(load_progress(target, &db_connection)))
}

#[put("/target-trackers/<tracker_id>", format = "json", data = "<patch>")]
pub fn update_target(
    tracker_id: Result<i64, &str>,
    patch: Json<TargetPatch>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<TargetTracker>> {
    let tracker_id = parse_id(tracker_id, "tracker")?;
    let db_connection = db_connection.lock()?;

    let mut target = get_target_from_db(tracker_id, &db_connection)?;
    patch.into_inner().apply(&mut target)?;
    update_target_in_db(&target, &db_connection)?;

    Ok(Json(load_progress(target, &db_connection)))
}

#[delete("/target-trackers/<tracker_id>")]
pub fn delete_target(
    tracker_id: Result<i64, &str>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Status> {
    let tracker_id = parse_id(tracker_id, "tracker")?;
    let mut db_connection = db_connection.lock()?;

    delete_target_from_db(tracker_id, &mut db_connection)?;

    Ok(Status::NoContent)
}

#[post("/target-trackers/<tracker_id>/entries", format = "json", data = "<request>")]
pub fn add_target_entry(
    tracker_id: Result<i64, &str>,
    request: Json<AddEntryRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Created<Json<Entry>>> {
    let tracker_id = parse_id(tracker_id, "tracker")?;
    let db_connection = db_connection.lock()?;

    get_target_from_db(tracker_id, &db_connection)?;
    let entry = request
        .into_inner()
        .into_entry(tracker_id, TrackerType::Target, Local::now())?;
    let created = add_entry_to_db(entry, &db_connection)?;

    Ok(Created::new(format!("/api/entries/{}", created.id)).body(Json(created)))
}

#[get("/target-trackers/<tracker_id>/entries")]
pub fn get_target_entries(
    tracker_id: Result<i64, &str>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<Entry>>> {
    let tracker_id = parse_id(tracker_id, "tracker")?;
    let db_connection = db_connection.lock()?;

    let target = get_target_from_db(tracker_id, &db_connection)?;
    let entries = get_entries_since(
        tracker_id,
        TrackerType::Target,
        target.start_date,
        &db_connection,
    )?;

    Ok(Json(entries))
}

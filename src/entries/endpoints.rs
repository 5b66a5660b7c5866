use chrono::Local;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{delete, get, put, State};
use tracing::info;

use crate::data::{parse_id, DBConnection};
use crate::internal_error::{InternalError, InternalResult};

use super::data::*;
use super::helpers::*;

#[get("/entries")]
pub fn get_entries(db_connection: &State<DBConnection>) -> InternalResult<Json<Vec<Entry>>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(get_all_entries_from_db(&db_connection)?))
}

#[put("/entries/<entry_id>", format = "json", data = "<patch>")]
pub fn update_entry(
    entry_id: Result<i64, &str>,
    patch: Json<EntryPatch>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Entry>> {
    let entry_id = parse_id(entry_id, "entry")?;
    let db_connection = db_connection.lock()?;

    let mut entry = get_entry_from_db(entry_id, &db_connection)?;
    patch.into_inner().apply(&mut entry, Local::now())?;
    update_entry_in_db(&entry, &db_connection)?;

    Ok(Json(entry))
}

#[delete("/entries/<entry_id>")]
pub fn delete_entry(
    entry_id: Result<i64, &str>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Status> {
    let entry_id = parse_id(entry_id, "entry")?;
    let db_connection = db_connection.lock()?;

    delete_entry_from_db(entry_id, &db_connection)?;

    Ok(Status::NoContent)
}

#[delete("/entries", format = "json", data = "<entry_ids>")]
pub fn bulk_delete_entries(
    entry_ids: Json<Vec<EntryID>>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Status> {
    if entry_ids.is_empty() {
        return Err(InternalError::bad_request("No entry IDs provided"));
    }

    let mut db_connection = db_connection.lock()?;
    let deleted = delete_entries_from_db(&entry_ids, &mut db_connection)?;
    info!(requested = entry_ids.len(), deleted, "bulk deleted entries");

    Ok(Status::NoContent)
}

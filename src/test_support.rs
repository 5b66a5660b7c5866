//! Helpers for driving the full Rocket instance against an in-memory database.

use rocket::http::Status;
use rocket::local::blocking::Client;
use serde_json::{json, Value};

use crate::build_rocket;
use crate::data::{open_test_database, DBConnection};

pub fn client() -> Client {
    client_on(open_test_database())
}

/// For tests that also need to reach the database directly.
pub fn client_on(db_connection: DBConnection) -> Client {
    Client::tracked(build_rocket(db_connection)).expect("valid rocket instance")
}

pub fn daily_habit(name: &str, start_date: &str) -> Value {
    json!({
        "trackerName": name,
        "goal": 1,
        "timePeriod": "perDay",
        "startDate": start_date,
        "due": {"type": "interval", "intervalType": "day", "intervalValue": 1}
    })
}

fn create(client: &Client, path: &str, body: Value) -> i64 {
    let response = client.post(path).json(&body).dispatch();
    assert_eq!(response.status(), Status::Created);

    let created: Value = response.into_json().expect("tracker body");
    created["id"].as_i64().expect("tracker id")
}

pub fn create_habit(client: &Client, body: Value) -> i64 {
    create(client, "/api/habit-trackers", body)
}

pub fn create_target(client: &Client, body: Value) -> i64 {
    create(client, "/api/target-trackers", body)
}

/// `kind` is the route prefix, `habit-trackers` or `target-trackers`.
pub fn add_entry(client: &Client, kind: &str, tracker_id: i64, body: Value) -> Value {
    let response = client
        .post(format!("/api/{}/{}/entries", kind, tracker_id))
        .json(&body)
        .dispatch();
    assert_eq!(response.status(), Status::Created);

    response.into_json().expect("entry body")
}

use serde::{Deserialize, Serialize};

use crate::habit::data::HabitTracker;
use crate::target::data::TargetTracker;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TrackersResponse {
    pub habit_trackers: Vec<HabitTracker>,
    pub target_trackers: Vec<TargetTracker>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub date: String,
    pub habit_trackers: Vec<HabitTracker>,
    pub target_trackers: Vec<TargetTracker>,
}

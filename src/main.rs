use rocket::{Build, Rocket};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use std::error::Error;

mod config;
mod data;
mod entries;
mod habit;
mod internal_error;
mod overview;
mod target;
mod trackers;

#[cfg(test)]
mod test_support;

use config::AppConfig;
use data::DBConnection;

#[macro_use]
extern crate rocket;

pub fn build_rocket(connection: DBConnection) -> Rocket<Build> {
    rocket::build().manage(connection).mount(
        "/api",
        routes![
            habit::endpoints::get_habits,
            habit::endpoints::create_habit,
            habit::endpoints::get_habit,
            habit::endpoints::update_habit,
            habit::endpoints::delete_habit,
            habit::endpoints::add_habit_entry,
            habit::endpoints::get_habit_entries,
            target::endpoints::get_targets,
            target::endpoints::create_target,
            target::endpoints::get_target,
            target::endpoints::update_target,
            target::endpoints::delete_target,
            target::endpoints::add_target_entry,
            target::endpoints::get_target_entries,
            entries::endpoints::get_entries,
            entries::endpoints::update_entry,
            entries::endpoints::delete_entry,
            entries::endpoints::bulk_delete_entries,
            overview::endpoints::get_all_trackers,
            overview::endpoints::get_dashboard,
        ],
    )
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_figment(&rocket::Config::figment())?;
    let connection = data::open_database(&config.database_path)?;
    info!(database = %config.database_path.display(), "starting habit & target tracker");

    build_rocket(connection).launch().await?;

    Ok(())
}

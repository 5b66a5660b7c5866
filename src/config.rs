use rocket::figment::Figment;
use serde::Deserialize;

use std::path::PathBuf;

/// Service settings read from `Rocket.toml` and `ROCKET_*` environment variables,
/// alongside Rocket's own address/port keys.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> AppConfig {
        AppConfig {
            database_path: PathBuf::from("tracker.db"),
        }
    }
}

impl AppConfig {
    pub fn from_figment(figment: &Figment) -> Result<AppConfig, rocket::figment::Error> {
        figment.extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_path_defaults_when_unset() {
        let figment = Figment::new();
        let config = AppConfig::from_figment(&figment).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn database_path_is_read_from_figment() {
        let figment = Figment::new().merge(("database_path", "/var/lib/tracker/data.db"));
        let config = AppConfig::from_figment(&figment).unwrap();

        assert_eq!(
            config.database_path,
            PathBuf::from("/var/lib/tracker/data.db")
        );
    }
}

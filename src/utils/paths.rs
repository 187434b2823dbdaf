use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".service_booking";
const CONFIG_FILE: &str = "config.json";
const VEHICLE_PROFILE_FILE: &str = "vehicle_profile.json";
const SESSION_FILE: &str = "session.json";

/// Environment variable overriding the application data directory.
pub const HOME_ENV: &str = "SERVICE_BOOKING_HOME";

/// Returns the application-specific data directory, defaulting to `~/.service_booking`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Location of the last-used vehicle profile.
pub fn vehicle_profile_file_in(base: &std::path::Path) -> PathBuf {
    base.join(VEHICLE_PROFILE_FILE)
}

/// Location of the persisted bearer token.
pub fn session_file_in(base: &std::path::Path) -> PathBuf {
    base.join(SESSION_FILE)
}

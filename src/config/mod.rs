use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::StorageError,
    utils::{fs::replace_file, paths},
};

/// Environment variable overriding [`Config::api_base_url`].
pub const API_URL_ENV: &str = "SERVICE_BOOKING_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    /// Optional custom location for the saved vehicle profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_profile_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::default_api_base_url(),
            currency: Self::default_currency(),
            locale: Self::default_locale(),
            vehicle_profile_file: None,
        }
    }
}

impl Config {
    pub fn default_api_base_url() -> String {
        "http://localhost:8080/api".into()
    }

    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_locale() -> String {
        "en-US".into()
    }

    /// Applies `SERVICE_BOOKING_API_URL` when set to a non-empty value.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
        self
    }

    pub fn resolve_vehicle_profile_file(&self, base: &Path) -> PathBuf {
        self.vehicle_profile_file
            .clone()
            .unwrap_or_else(|| paths::vehicle_profile_file_in(base))
    }
}

/// Loads and saves [`Config`] as JSON inside the application data directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, StorageError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&base)?;
        let path = paths::config_file_in(&base);
        Ok(Self { base, path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file yields defaults; a malformed file is an error.
    pub fn load(&self) -> Result<Config, StorageError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(config)?;
        replace_file(&self.path, &json)?;
        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    domain::VehicleInfo,
    utils::{
        fs::replace_file,
        paths::{session_file_in, vehicle_profile_file_in},
    },
};

use super::{Result, SessionStore, VehicleProfileStore};

/// Vehicle profile kept as a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonVehicleStore {
    path: PathBuf,
}

impl JsonVehicleStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(base: &Path) -> Self {
        Self::new(vehicle_profile_file_in(base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<VehicleInfo>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }
}

impl VehicleProfileStore for JsonVehicleStore {
    fn load(&self) -> Option<VehicleInfo> {
        match self.read() {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "ignoring unreadable saved vehicle profile"
                );
                None
            }
        }
    }

    fn save(&self, vehicle: &VehicleInfo) -> Result<()> {
        let json = serde_json::to_string_pretty(vehicle)?;
        replace_file(&self.path, &json)?;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Bearer token persisted next to the rest of the local state.
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(base: &Path) -> Self {
        Self::new(session_file_in(base))
    }

    fn read_state(&self) -> Result<SessionState> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(SessionState::default())
        }
    }
}

impl SessionStore for JsonSessionStore {
    fn token(&self) -> Option<String> {
        self.read_state()
            .ok()
            .and_then(|state| state.token)
            .filter(|token| !token.trim().is_empty())
    }

    fn store(&self, token: &str) -> Result<()> {
        let state = SessionState {
            token: Some(token.trim().to_string()),
        };
        replace_file(&self.path, &serde_json::to_string_pretty(&state)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

use std::sync::Mutex;

use crate::domain::VehicleInfo;

use super::{Result, SessionStore, VehicleProfileStore};

/// Process-local vehicle profile store.
#[derive(Debug, Default)]
pub struct MemoryVehicleStore {
    profile: Mutex<Option<VehicleInfo>>,
}

impl MemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(vehicle: VehicleInfo) -> Self {
        Self {
            profile: Mutex::new(Some(vehicle)),
        }
    }
}

impl VehicleProfileStore for MemoryVehicleStore {
    fn load(&self) -> Option<VehicleInfo> {
        self.profile.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, vehicle: &VehicleInfo) -> Result<()> {
        if let Ok(mut guard) = self.profile.lock() {
            *guard = Some(vehicle.clone());
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn store(&self, token: &str) -> Result<()> {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
        Ok(())
    }
}

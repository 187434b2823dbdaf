pub mod json_backend;
pub mod memory;

use crate::{domain::VehicleInfo, errors::StorageError};

pub type Result<T> = std::result::Result<T, StorageError>;

/// Persists the last successfully booked vehicle across wizard sessions.
pub trait VehicleProfileStore: Send + Sync {
    /// Saved profile, or `None` when absent or unreadable. Never fails.
    fn load(&self) -> Option<VehicleInfo>;
    /// Replaces the saved profile.
    fn save(&self, vehicle: &VehicleInfo) -> Result<()>;
}

/// Holds the bearer token used to authenticate booking requests.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn store(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub use json_backend::{JsonSessionStore, JsonVehicleStore};
pub use memory::{MemorySessionStore, MemoryVehicleStore};

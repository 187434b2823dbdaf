use std::fmt;

use serde::{Deserialize, Serialize};

/// Vehicle details collected in the second wizard step.
///
/// The same shape is persisted as the saved vehicle profile used to prefill
/// the next booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInfo {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    pub year: i32,
    #[serde(default)]
    pub license_plate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl VehicleInfo {
    /// Creates an empty profile for a vehicle of the given model year.
    pub fn empty(year: i32) -> Self {
        Self {
            make: String::new(),
            model: String::new(),
            year,
            license_plate: String::new(),
            color: None,
        }
    }

    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        license_plate: impl Into<String>,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            license_plate: license_plate.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// True when make, model and plate are all present after trimming.
    pub fn is_complete(&self) -> bool {
        !self.make.trim().is_empty()
            && !self.model.trim().is_empty()
            && !self.license_plate.trim().is_empty()
    }
}

impl fmt::Display for VehicleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.year, self.make, self.model)?;
        if let Some(color) = self.color.as_deref().filter(|c| !c.trim().is_empty()) {
            write!(f, " ({color})")?;
        }
        if !self.license_plate.trim().is_empty() {
            write!(f, " [{}]", self.license_plate)?;
        }
        Ok(())
    }
}

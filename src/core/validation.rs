use std::{collections::BTreeMap, fmt};

use crate::{
    core::wizard::WizardStep,
    domain::{BookingDraft, BookingField},
};

/// A single field-level problem shown inline next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingService,
    MissingMake,
    MissingModel,
    MissingPlate,
    MissingDate,
    MissingTimeSlot,
    SubmissionFailed(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingService => f.write_str("Please select a service"),
            ValidationError::MissingMake => f.write_str("Vehicle make is required"),
            ValidationError::MissingModel => f.write_str("Vehicle model is required"),
            ValidationError::MissingPlate => f.write_str("License plate is required"),
            ValidationError::MissingDate => f.write_str("Please select a date"),
            ValidationError::MissingTimeSlot => f.write_str("Please select a time slot"),
            ValidationError::SubmissionFailed(reason) => f.write_str(reason),
        }
    }
}

/// Field name to message mapping. Empty means the step is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<BookingField, ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: BookingField) -> Option<&ValidationError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: BookingField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: BookingField, error: ValidationError) {
        self.0.insert(field, error);
    }

    pub fn remove(&mut self, field: BookingField) -> Option<ValidationError> {
        self.0.remove(&field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookingField, &ValidationError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    fn require(&mut self, present: bool, field: BookingField, error: ValidationError) {
        if !present {
            self.insert(field, error);
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .iter()
            .map(|(field, error)| format!("{field}: {error}"))
            .collect();
        f.write_str(&messages.join("; "))
    }
}

/// Per-step gates deciding whether the wizard may move forward.
pub struct ValidationRules;

impl ValidationRules {
    /// Checks the fields owned by `step`. Every failing field is reported.
    pub fn validate(step: WizardStep, draft: &BookingDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        match step {
            WizardStep::Service => {
                errors.require(
                    draft.has_service(),
                    BookingField::ServiceId,
                    ValidationError::MissingService,
                );
            }
            WizardStep::Vehicle => {
                let vehicle = &draft.vehicle_info;
                errors.require(
                    !vehicle.make.trim().is_empty(),
                    BookingField::Make,
                    ValidationError::MissingMake,
                );
                errors.require(
                    !vehicle.model.trim().is_empty(),
                    BookingField::Model,
                    ValidationError::MissingModel,
                );
                errors.require(
                    !vehicle.license_plate.trim().is_empty(),
                    BookingField::LicensePlate,
                    ValidationError::MissingPlate,
                );
            }
            WizardStep::Schedule => {
                errors.require(
                    draft.booking_date.is_some(),
                    BookingField::BookingDate,
                    ValidationError::MissingDate,
                );
                errors.require(
                    draft.time_slot.is_some(),
                    BookingField::TimeSlot,
                    ValidationError::MissingTimeSlot,
                );
            }
            WizardStep::Review => {}
        }
        errors
    }

    /// Re-checks every step that precedes the review.
    pub fn validate_for_submission(draft: &BookingDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for step in [WizardStep::Service, WizardStep::Vehicle, WizardStep::Schedule] {
            errors.extend(Self::validate(step, draft));
        }
        errors
    }
}

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::vehicle::VehicleInfo;

/// Maximum number of characters accepted in the notes field.
pub const NOTES_MAX_LEN: usize = 500;

const OFFERED_SLOTS: [(u8, u8); 7] = [
    (9, 0),
    (10, 0),
    (11, 0),
    (13, 0),
    (14, 0),
    (15, 0),
    (16, 0),
];

/// One of the fixed appointment times offered by the workshop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    hour: u8,
    minute: u8,
}

impl TimeSlot {
    /// All offered slots in chronological order.
    pub fn offered() -> impl Iterator<Item = TimeSlot> {
        OFFERED_SLOTS
            .iter()
            .map(|&(hour, minute)| TimeSlot { hour, minute })
    }

    /// Parses `HH:MM`, accepting only offered slots.
    pub fn parse(value: &str) -> Option<TimeSlot> {
        let (hour, minute) = value.trim().split_once(':')?;
        let hour: u8 = hour.parse().ok()?;
        let minute: u8 = minute.parse().ok()?;
        Self::offered().find(|slot| slot.hour == hour && slot.minute == minute)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TimeSlot::parse(&value).ok_or_else(|| format!("`{value}` is not an offered time slot"))
    }
}

/// Addressable fields of a draft; keys of the validation error set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingField {
    ServiceId,
    Make,
    Model,
    Year,
    LicensePlate,
    Color,
    BookingDate,
    TimeSlot,
    Notes,
    /// Not a form field: holds the outcome of a failed submission.
    Submission,
}

impl BookingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingField::ServiceId => "serviceId",
            BookingField::Make => "make",
            BookingField::Model => "model",
            BookingField::Year => "year",
            BookingField::LicensePlate => "licensePlate",
            BookingField::Color => "color",
            BookingField::BookingDate => "bookingDate",
            BookingField::TimeSlot => "timeSlot",
            BookingField::Notes => "notes",
            BookingField::Submission => "submission",
        }
    }
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single edit to the draft. Applying it always targets exactly one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    ServiceId(Option<String>),
    Make(String),
    Model(String),
    Year(i32),
    LicensePlate(String),
    Color(Option<String>),
    BookingDate(Option<NaiveDate>),
    TimeSlot(Option<TimeSlot>),
    Notes(String),
}

impl FieldUpdate {
    pub fn field(&self) -> BookingField {
        match self {
            FieldUpdate::ServiceId(_) => BookingField::ServiceId,
            FieldUpdate::Make(_) => BookingField::Make,
            FieldUpdate::Model(_) => BookingField::Model,
            FieldUpdate::Year(_) => BookingField::Year,
            FieldUpdate::LicensePlate(_) => BookingField::LicensePlate,
            FieldUpdate::Color(_) => BookingField::Color,
            FieldUpdate::BookingDate(_) => BookingField::BookingDate,
            FieldUpdate::TimeSlot(_) => BookingField::TimeSlot,
            FieldUpdate::Notes(_) => BookingField::Notes,
        }
    }
}

/// In-progress booking data owned by a single wizard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    /// Stable per-session key; sent as the idempotency key on submission.
    pub session_id: Uuid,
    pub service_id: Option<String>,
    pub vehicle_info: VehicleInfo,
    pub booking_date: Option<NaiveDate>,
    pub time_slot: Option<TimeSlot>,
    pub notes: String,
}

impl BookingDraft {
    /// Empty draft whose vehicle year defaults to `current_year`.
    pub fn new(current_year: i32) -> Self {
        Self::with_vehicle(VehicleInfo::empty(current_year))
    }

    /// Empty draft prefilled with a previously used vehicle.
    pub fn with_vehicle(vehicle_info: VehicleInfo) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            service_id: None,
            vehicle_info,
            booking_date: None,
            time_slot: None,
            notes: String::new(),
        }
    }

    /// Applies an edit and reports which field changed.
    pub fn apply(&mut self, update: FieldUpdate) -> BookingField {
        let field = update.field();
        match update {
            FieldUpdate::ServiceId(id) => {
                self.service_id = id.filter(|value| !value.trim().is_empty());
            }
            FieldUpdate::Make(make) => self.vehicle_info.make = make,
            FieldUpdate::Model(model) => self.vehicle_info.model = model,
            FieldUpdate::Year(year) => self.vehicle_info.year = year,
            FieldUpdate::LicensePlate(plate) => self.vehicle_info.license_plate = plate,
            FieldUpdate::Color(color) => {
                self.vehicle_info.color = color.filter(|value| !value.trim().is_empty());
            }
            FieldUpdate::BookingDate(date) => self.booking_date = date,
            FieldUpdate::TimeSlot(slot) => self.time_slot = slot,
            FieldUpdate::Notes(notes) => self.notes = truncate_chars(notes, NOTES_MAX_LEN),
        }
        field
    }

    pub fn has_service(&self) -> bool {
        self.service_id.is_some()
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.trim().is_empty()
    }
}

fn truncate_chars(mut value: String, max: usize) -> String {
    if let Some((index, _)) = value.char_indices().nth(max) {
        value.truncate(index);
    }
    value
}

/// Identifier assigned by the booking API to a created booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub String);

impl BookingId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload sent to `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub service_id: String,
    pub vehicle_info: VehicleInfo,
    pub booking_date: NaiveDate,
    pub time_slot: TimeSlot,
    pub notes: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub service_name: String,
    #[serde(skip)]
    pub idempotency_key: Uuid,
}

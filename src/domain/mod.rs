pub mod booking;
pub mod service;
pub mod vehicle;

pub use booking::{BookingDraft, BookingField, BookingId, BookingRequest, FieldUpdate, TimeSlot};
pub use service::{Service, ServiceCategory};
pub use vehicle::VehicleInfo;

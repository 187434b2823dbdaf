use std::sync::Arc;

use crate::{
    api::BookingGateway,
    core::{pricing::PricingEngine, validation::ValidationRules, ValidationErrors},
    domain::{BookingDraft, BookingId, BookingRequest, Service, VehicleInfo},
    errors::SubmitError,
};

/// Packages a completed draft and hands it to the booking API.
#[derive(Clone)]
pub struct BookingSubmitter {
    gateway: Arc<dyn BookingGateway>,
}

impl BookingSubmitter {
    pub fn new(gateway: Arc<dyn BookingGateway>) -> Self {
        Self { gateway }
    }

    /// Builds the request payload, or the field errors preventing it.
    pub fn package(
        draft: &BookingDraft,
        service: &Service,
    ) -> Result<BookingRequest, ValidationErrors> {
        let errors = ValidationRules::validate_for_submission(draft);
        if !errors.is_empty() {
            return Err(errors);
        }
        let (Some(booking_date), Some(time_slot)) = (draft.booking_date, draft.time_slot) else {
            return Err(errors);
        };
        let vehicle = &draft.vehicle_info;
        Ok(BookingRequest {
            service_id: service.id.clone(),
            vehicle_info: VehicleInfo {
                make: vehicle.make.trim().to_string(),
                model: vehicle.model.trim().to_string(),
                year: vehicle.year,
                license_plate: vehicle.license_plate.trim().to_string(),
                color: vehicle.color.clone(),
            },
            booking_date,
            time_slot,
            notes: draft.notes.trim().to_string(),
            total_price: PricingEngine::total(Some(service)),
            service_name: service.name.clone(),
            idempotency_key: draft.session_id,
        })
    }

    /// Packages and sends in one step.
    pub async fn submit(
        &self,
        draft: &BookingDraft,
        service: &Service,
        token: Option<&str>,
    ) -> Result<BookingId, SubmitError> {
        let request = Self::package(draft, service)
            .map_err(|errors| SubmitError::rejected(errors.to_string()))?;
        self.send(&request, token).await
    }

    pub async fn send(
        &self,
        request: &BookingRequest,
        token: Option<&str>,
    ) -> Result<BookingId, SubmitError> {
        tracing::debug!(
            service_id = %request.service_id,
            date = %request.booking_date,
            slot = %request.time_slot,
            "sending booking request"
        );
        self.gateway.create_booking(request, token).await
    }
}

pub mod http;

use async_trait::async_trait;

use crate::{
    domain::{BookingId, BookingRequest, Service},
    errors::SubmitError,
};

pub use http::HttpBookingGateway;

/// Remote collaborator owning the service catalog and booking creation.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// `GET /services`.
    async fn fetch_services(&self) -> Result<Vec<Service>, SubmitError>;

    /// `POST /bookings`, bearer-authenticated when a token is supplied.
    async fn create_booking(
        &self,
        request: &BookingRequest,
        token: Option<&str>,
    ) -> Result<BookingId, SubmitError>;
}

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::Config,
    domain::{BookingId, BookingRequest, Service},
    errors::SubmitError,
};

use super::BookingGateway;

const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// reqwest-backed client for the booking REST API.
#[derive(Debug, Clone)]
pub struct HttpBookingGateway {
    base_url: String,
    http: Client,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogResponse {
    List(Vec<Service>),
    Wrapped { services: Vec<Service> },
}

impl HttpBookingGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl BookingGateway for HttpBookingGateway {
    async fn fetch_services(&self) -> Result<Vec<Service>, SubmitError> {
        let resp = self
            .http
            .get(self.url("/services"))
            .send()
            .await
            .map_err(|err| SubmitError::network(format!("Failed to reach booking API: {err}")))?;
        let resp = ensure_success(resp).await?;
        let catalog = resp
            .json::<CatalogResponse>()
            .await
            .map_err(|err| SubmitError::rejected(format!("Invalid catalog response: {err}")))?;
        Ok(match catalog {
            CatalogResponse::List(services) | CatalogResponse::Wrapped { services } => services,
        })
    }

    async fn create_booking(
        &self,
        request: &BookingRequest,
        token: Option<&str>,
    ) -> Result<BookingId, SubmitError> {
        let mut builder = self
            .http
            .post(self.url("/bookings"))
            .header(IDEMPOTENCY_HEADER, request.idempotency_key.to_string())
            .json(request);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        let resp = builder
            .send()
            .await
            .map_err(|err| SubmitError::network(format!("Failed to reach booking API: {err}")))?;
        let resp = ensure_success(resp).await?;
        let body = resp
            .json::<Value>()
            .await
            .map_err(|err| SubmitError::rejected(format!("Invalid booking response: {err}")))?;
        extract_booking_id(&body)
            .ok_or_else(|| SubmitError::rejected("Booking response did not include an id"))
    }
}

async fn ensure_success(resp: Response) -> Result<Response, SubmitError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = server_message(&body, status);
    if status == StatusCode::UNAUTHORIZED {
        Err(SubmitError::unauthorized(message))
    } else {
        Err(SubmitError::rejected(message))
    }
}

/// The server's own wording: `message`/`error` field, raw body, or status text.
fn server_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}

fn extract_booking_id(body: &Value) -> Option<BookingId> {
    let id = body
        .get("id")
        .or_else(|| body.get("booking").and_then(|booking| booking.get("id")))?;
    match id {
        Value::String(text) if !text.is_empty() => Some(BookingId(text.clone())),
        Value::Number(number) => Some(BookingId(number.to_string())),
        _ => None,
    }
}

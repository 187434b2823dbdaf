#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use service_booking::{
    api::BookingGateway,
    core::{FixedClock, WizardController, WizardDeps},
    domain::{BookingId, BookingRequest, Service, ServiceCategory},
    errors::SubmitError,
    storage::{JsonSessionStore, JsonVehicleStore, SessionStore},
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Gateway double that records every booking request it receives.
pub struct RecordingGateway {
    services: Vec<Service>,
    response: Mutex<Result<BookingId, SubmitError>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<BookingRequest>>,
}

impl RecordingGateway {
    pub fn new(services: Vec<Service>) -> Self {
        Self {
            services,
            response: Mutex::new(Ok(BookingId("booking-100".into()))),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn respond_with(&self, response: Result<BookingId, SubmitError>) {
        *self.response.lock().expect("response lock") = response;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<BookingRequest> {
        self.requests.lock().expect("requests lock").last().cloned()
    }
}

#[async_trait]
impl BookingGateway for RecordingGateway {
    async fn fetch_services(&self) -> Result<Vec<Service>, SubmitError> {
        Ok(self.services.clone())
    }

    async fn create_booking(
        &self,
        request: &BookingRequest,
        _token: Option<&str>,
    ) -> Result<BookingId, SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        self.response.lock().expect("response lock").clone()
    }
}

pub fn sample_catalog() -> Vec<Service> {
    vec![
        Service::new(
            "svc1",
            "Brake Inspection",
            ServiceCategory::Inspection,
            Decimal::new(12000, 2),
            45,
        ),
        Service::new(
            "svc2",
            "Oil Change",
            ServiceCategory::Maintenance,
            Decimal::new(6000, 2),
            30,
        ),
        Service::new(
            "svc3",
            "Ceramic Coating",
            ServiceCategory::Customization,
            Decimal::new(45000, 2),
            240,
        ),
    ]
}

/// Controller wired to JSON stores in a fresh temp dir and a recording gateway.
pub struct TestEnv {
    pub gateway: Arc<RecordingGateway>,
    pub vehicles: Arc<JsonVehicleStore>,
    pub session: Arc<JsonSessionStore>,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create temp dir");
        let base = temp.path().to_path_buf();
        TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

        let session = JsonSessionStore::in_dir(&base);
        session.store("test-token").expect("seed session token");
        Self {
            gateway: Arc::new(RecordingGateway::new(sample_catalog())),
            vehicles: Arc::new(JsonVehicleStore::in_dir(&base)),
            session: Arc::new(session),
        }
    }

    pub fn deps(&self) -> WizardDeps {
        WizardDeps {
            gateway: self.gateway.clone(),
            vehicles: self.vehicles.clone(),
            session: self.session.clone(),
            clock: Arc::new(FixedClock::on(2024, 3, 15)),
        }
    }

    pub async fn controller(&self) -> WizardController {
        WizardController::mount(self.deps()).await
    }
}

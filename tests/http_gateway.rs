use std::sync::Arc;

use chrono::NaiveDate;
use mockito::Matcher;
use rust_decimal::Decimal;
use serde_json::json;
use service_booking::{
    api::{BookingGateway, HttpBookingGateway},
    core::{FixedClock, SubmitOutcome, WizardController, WizardDeps, WizardStep},
    domain::{BookingId, BookingRequest, FieldUpdate, ServiceCategory, TimeSlot, VehicleInfo},
    errors::SubmitErrorKind,
    storage::{MemorySessionStore, MemoryVehicleStore, SessionStore},
};
use uuid::Uuid;

const CATALOG: &str = r#"[
    {"id":"svc1","name":"Brake Inspection","description":"Pads and rotors","category":"inspection","price":120.0,"duration":45,"isAvailable":true},
    {"id":"svc2","name":"Detailing","description":"","category":"customization","price":200,"duration":180,"isAvailable":true}
]"#;

fn sample_request() -> BookingRequest {
    BookingRequest {
        service_id: "svc1".into(),
        vehicle_info: VehicleInfo::new("Honda", "Fit", 2017, "FIT-17"),
        booking_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        time_slot: TimeSlot::parse("13:00").unwrap(),
        notes: "Squeaky brakes".into(),
        total_price: Decimal::new(13200, 2),
        service_name: "Brake Inspection".into(),
        idempotency_key: Uuid::new_v4(),
    }
}

#[tokio::test]
async fn fetches_catalog_array() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/services")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CATALOG)
        .create_async()
        .await;

    let gateway = HttpBookingGateway::new(server.url());
    let services = gateway.fetch_services().await.expect("catalog");
    mock.assert_async().await;
    assert_eq!(services.len(), 2);
    assert_eq!(services[0].category, ServiceCategory::Inspection);
    assert_eq!(services[0].price, Decimal::new(120, 0));
}

#[tokio::test]
async fn fetches_wrapped_catalog() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/services")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"services": {CATALOG}}}"#))
        .create_async()
        .await;

    let gateway = HttpBookingGateway::new(format!("{}/api/", server.url()));
    let services = gateway.fetch_services().await.expect("catalog");
    assert_eq!(services[1].name, "Detailing");
}

#[tokio::test]
async fn create_booking_sends_payload_auth_and_idempotency_key() {
    let mut server = mockito::Server::new_async().await;
    let request = sample_request();
    let mock = server
        .mock("POST", "/bookings")
        .match_header("authorization", "Bearer secret-token")
        .match_header(
            "idempotency-key",
            request.idempotency_key.to_string().as_str(),
        )
        .match_body(Matcher::PartialJson(json!({
            "serviceId": "svc1",
            "bookingDate": "2024-06-03",
            "timeSlot": "13:00",
            "totalPrice": 132.0,
            "serviceName": "Brake Inspection",
            "vehicleInfo": {"make": "Honda", "licensePlate": "FIT-17"}
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"booking":{"id":"bk-77"}}"#)
        .create_async()
        .await;

    let gateway = HttpBookingGateway::new(server.url());
    let id = gateway
        .create_booking(&request, Some("secret-token"))
        .await
        .expect("created");
    mock.assert_async().await;
    assert_eq!(id, BookingId("bk-77".into()));
}

#[tokio::test]
async fn unauthorized_response_maps_to_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/bookings")
        .with_status(401)
        .with_body(r#"{"message":"Token expired"}"#)
        .create_async()
        .await;

    let gateway = HttpBookingGateway::new(server.url());
    let err = gateway
        .create_booking(&sample_request(), Some("stale"))
        .await
        .expect_err("unauthorized");
    assert_eq!(err.kind, SubmitErrorKind::Unauthorized);
    assert_eq!(err.message, "Token expired");
}

#[tokio::test]
async fn rejection_message_is_passed_through_verbatim() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/bookings")
        .with_status(409)
        .with_body(r#"{"message":"That time slot is already booked"}"#)
        .create_async()
        .await;

    let gateway = HttpBookingGateway::new(server.url());
    let err = gateway
        .create_booking(&sample_request(), None)
        .await
        .expect_err("rejected");
    assert_eq!(err.kind, SubmitErrorKind::ServerRejected);
    assert_eq!(err.to_string(), "That time slot is already booked");
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let gateway = HttpBookingGateway::new("http://127.0.0.1:1");
    let err = gateway
        .create_booking(&sample_request(), None)
        .await
        .expect_err("no server");
    assert_eq!(err.kind, SubmitErrorKind::NetworkError);
}

#[tokio::test]
async fn controller_over_http_handles_expired_session() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/services")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CATALOG)
        .create_async()
        .await;
    let bookings = server
        .mock("POST", "/bookings")
        .with_status(401)
        .with_body("")
        .expect(1)
        .create_async()
        .await;

    let session = Arc::new(MemorySessionStore::with_token("old-token"));
    let deps = WizardDeps {
        gateway: Arc::new(HttpBookingGateway::new(server.url())),
        vehicles: Arc::new(MemoryVehicleStore::new()),
        session: session.clone(),
        clock: Arc::new(FixedClock::on(2024, 6, 1)),
    };
    let mut controller = WizardController::mount(deps).await;
    controller.select_service("svc1").unwrap();
    controller.advance().unwrap();
    controller.set_field(FieldUpdate::Make("Honda".into())).unwrap();
    controller.set_field(FieldUpdate::Model("Fit".into())).unwrap();
    controller
        .set_field(FieldUpdate::LicensePlate("FIT-17".into()))
        .unwrap();
    controller.advance().unwrap();
    controller
        .set_field(FieldUpdate::BookingDate(NaiveDate::from_ymd_opt(2024, 6, 3)))
        .unwrap();
    controller
        .set_field(FieldUpdate::TimeSlot(TimeSlot::parse("13:00")))
        .unwrap();
    assert_eq!(controller.advance(), Ok(WizardStep::Review));

    let outcome = controller.submit().await.expect("submit");
    bookings.assert_async().await;
    assert_eq!(outcome, SubmitOutcome::SessionExpired);
    assert!(session.token().is_none());
    assert_eq!(controller.draft().vehicle_info.license_plate, "FIT-17");
}

#[tokio::test]
async fn catalog_failure_is_reported_in_snapshot() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/services")
        .with_status(500)
        .with_body("")
        .create_async()
        .await;

    let deps = WizardDeps {
        gateway: Arc::new(HttpBookingGateway::new(server.url())),
        vehicles: Arc::new(MemoryVehicleStore::new()),
        session: Arc::new(MemorySessionStore::new()),
        clock: Arc::new(FixedClock::on(2024, 6, 1)),
    };
    let controller = WizardController::mount(deps).await;
    let snapshot = controller.snapshot();
    assert_eq!(
        snapshot.catalog_error.as_deref(),
        Some("Internal Server Error")
    );
    assert!(controller.catalog().is_empty());
}

#[tokio::test]
async fn mounted_controller_drops_negative_priced_services() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/services")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"id":"svc1","name":"Brake Inspection","category":"inspection","price":120.0,"duration":45},
                {"id":"bad","name":"Credit","category":"repair","price":-30.0,"duration":15}
            ]"#,
        )
        .create_async()
        .await;

    let deps = WizardDeps {
        gateway: Arc::new(HttpBookingGateway::new(server.url())),
        vehicles: Arc::new(MemoryVehicleStore::new()),
        session: Arc::new(MemorySessionStore::new()),
        clock: Arc::new(FixedClock::on(2024, 6, 1)),
    };
    let controller = WizardController::mount(deps).await;
    let ids: Vec<&str> = controller.catalog().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["svc1"]);
}

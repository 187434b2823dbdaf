#![doc(test(attr(deny(warnings))))]

//! Service Booking drives the multi-step vehicle-service booking flow: service
//! selection, vehicle details, scheduling and review, producing a priced and
//! validated booking request for the remote booking API.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Service booking tracing initialized.");
    });
}

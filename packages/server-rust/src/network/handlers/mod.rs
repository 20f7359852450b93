//! HTTP handler definitions.
//!
//! Defines `AppState`, the shared state carried through axum extractors, and
//! re-exports all handler functions for building the router.

pub mod customer;
pub mod error;
pub mod health;
pub mod sms;

pub use customer::{combined_info_handler, info_by_path_handler, info_by_query_handler};
pub use error::ApiError;
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use sms::send_sms_handler;

use std::sync::Arc;
use std::time::Instant;

use aspectkit_core::Dispatcher;

use super::ShutdownController;
use crate::service::{CustomerController, SmsController};

/// Shared application state passed to all axum handlers via `State` extraction.
///
/// Every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Runs each endpoint operation through its interceptor chain.
    pub dispatcher: Dispatcher,
    pub customers: Arc<CustomerController>,
    pub sms: SmsController,
    /// Health state for the probe endpoints.
    pub shutdown: Arc<ShutdownController>,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}

/// State wired like production, with timing records sent to `logger`.
#[cfg(test)]
pub(crate) fn test_state(logger: Arc<dyn aspectkit_core::ExecutionLogger>) -> AppState {
    AppState {
        dispatcher: Dispatcher::new(crate::service::build_registry(logger)),
        customers: Arc::new(CustomerController::new("yasiya")),
        sms: SmsController,
        shutdown: Arc::new(ShutdownController::new()),
        start_time: Instant::now(),
    }
}

//! Customer lookup endpoints.
//!
//! Each handler wraps its arguments in an `OperationDescriptor` and runs the
//! controller call through the dispatcher, so the `@LogExecutionTime` chain
//! applies without the controller knowing about it.

use aspectkit_core::{OperationDescriptor, Value};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::service::operations::{
    string_arg, CUSTOMER_COMBINED_INFO, CUSTOMER_INFO_BY_PATH, CUSTOMER_INFO_BY_QUERY,
};

/// Query string of `GET /customer/info`. Both fields are required.
#[derive(Debug, Deserialize)]
pub struct InfoQuery {
    pub nic: String,
    pub name: String,
}

/// Query string of `GET /customer/allInfo/{nic}`.
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

/// `GET /customer/info/{nic}`
///
/// # Errors
///
/// Returns `ApiError` (400) if `nic` is blank, or the failure produced by the chain.
pub async fn info_by_path_handler(
    State(state): State<AppState>,
    Path(nic): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let invocation = OperationDescriptor::new(CUSTOMER_INFO_BY_PATH, vec![Value::from(nic)]);
    let customer = state.dispatcher.dispatch(&invocation, |inv| {
        let nic = string_arg(inv, 0, "nic")?;
        state.customers.info_by_path(nic).map(Value::from)
    })?;
    Ok(Json(customer.into()))
}

/// `GET /customer/info?nic=..&name=..`
///
/// # Errors
///
/// Returns `ApiError` (400) if either field is blank, or the failure produced by the chain.
pub async fn info_by_query_handler(
    State(state): State<AppState>,
    Query(query): Query<InfoQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let invocation = OperationDescriptor::new(
        CUSTOMER_INFO_BY_QUERY,
        vec![Value::from(query.nic), Value::from(query.name)],
    );
    let customer = state.dispatcher.dispatch(&invocation, |inv| {
        let nic = string_arg(inv, 0, "nic")?;
        let name = string_arg(inv, 1, "name")?;
        state.customers.info_by_query(nic, name).map(Value::from)
    })?;
    Ok(Json(customer.into()))
}

/// `GET /customer/allInfo/{nic}?name=..`
///
/// # Errors
///
/// Returns `ApiError` (400) if either field is blank, or the failure produced by the chain.
pub async fn combined_info_handler(
    State(state): State<AppState>,
    Path(nic): Path<String>,
    Query(query): Query<NameQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let invocation = OperationDescriptor::new(
        CUSTOMER_COMBINED_INFO,
        vec![Value::from(nic), Value::from(query.name)],
    );
    let customer = state.dispatcher.dispatch(&invocation, |inv| {
        let nic = string_arg(inv, 0, "nic")?;
        let name = string_arg(inv, 1, "name")?;
        state.customers.combined_info(nic, name).map(Value::from)
    })?;
    Ok(Json(customer.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use aspectkit_core::{CapturingLogger, InvocationError, Outcome};
    use serde_json::json;

    use super::*;
    use crate::network::handlers::test_state;

    #[tokio::test]
    async fn info_by_path_returns_default_name_and_logs_timing() {
        let logger = Arc::new(CapturingLogger::new());
        let state = test_state(logger.clone());

        let Json(body) = info_by_path_handler(State(state), Path("200257000817".into()))
            .await
            .unwrap();

        assert_eq!(body, json!({"name": "yasiya", "nic": "200257000817"}));
        let records = logger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].signature,
            "CustomerController.info_by_path(String)"
        );
        assert_eq!(records[0].outcome, Outcome::Ok);
    }

    #[tokio::test]
    async fn info_by_query_echoes_name() {
        let logger = Arc::new(CapturingLogger::new());
        let state = test_state(logger.clone());

        let query = InfoQuery {
            nic: "125478521".into(),
            name: "kamal".into(),
        };
        let Json(body) = info_by_query_handler(State(state), Query(query))
            .await
            .unwrap();

        assert_eq!(body, json!({"name": "kamal", "nic": "125478521"}));
        assert_eq!(
            logger.records()[0].signature,
            "CustomerController.info_by_query(String, String)"
        );
    }

    #[tokio::test]
    async fn combined_info_blank_name_fails_but_is_still_timed() {
        let logger = Arc::new(CapturingLogger::new());
        let state = test_state(logger.clone());

        let err = combined_info_handler(
            State(state),
            Path("200257000817".into()),
            Query(NameQuery { name: "  ".into() }),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.0,
            InvocationError::invalid_argument("name", "must not be blank")
        );
        let records = logger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].outcome, Outcome::Error);
    }
}

//! SMS endpoint.

use aspectkit_core::{OperationDescriptor, Value};
use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::{ApiError, AppState};
use crate::service::operations::{string_arg, SMS_SEND};

/// `POST /sms/send/{mobile}`: 200 with an empty body once the request is logged.
///
/// # Errors
///
/// Returns `ApiError` (400) if `mobile` is blank.
pub async fn send_sms_handler(
    State(state): State<AppState>,
    Path(mobile): Path<String>,
) -> Result<StatusCode, ApiError> {
    let invocation = OperationDescriptor::new(SMS_SEND, vec![Value::from(mobile)]);
    state.dispatcher.dispatch(&invocation, |inv| {
        let mobile = string_arg(inv, 0, "mobile")?;
        state.sms.send(mobile).map(Value::from)
    })?;
    Ok(StatusCode::OK)
}

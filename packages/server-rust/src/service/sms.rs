//! SMS send operation.

use aspectkit_core::InvocationError;
use tracing::info;

/// Accepts outbound SMS requests. Delivery is not performed; the request is
/// only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmsController;

impl SmsController {
    /// Records that an SMS was requested for `mobile`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `mobile` is blank.
    pub fn send(&self, mobile: &str) -> Result<(), InvocationError> {
        if mobile.trim().is_empty() {
            return Err(InvocationError::invalid_argument("mobile", "must not be blank"));
        }
        info!(mobile, "mobile number received");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_accepts_number() {
        assert!(SmsController.send("0771234567").is_ok());
    }

    #[test]
    fn send_rejects_blank_number() {
        assert!(matches!(
            SmsController.send(" "),
            Err(InvocationError::InvalidArgument { name, .. }) if name == "mobile"
        ));
    }
}

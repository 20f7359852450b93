use crate::types::Value;

/// Outcome of running an operation, intercepted or not.
pub type InvocationResult = Result<Value, InvocationError>;

/// Failures surfaced by an invocation.
///
/// The executor never creates one of these itself: every variant originates
/// either in the real operation or in an interceptor that chose to fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvocationError {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("access denied: {reason}")]
    Denied { reason: String },
    #[error("interceptor `{interceptor}` failed: {message}")]
    Interceptor { interceptor: String, message: String },
    #[error("operation failed: {0}")]
    Failed(String),
}

impl InvocationError {
    /// Convenience constructor for argument validation failures.
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for the variant.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Denied { .. } => "DENIED",
            Self::Interceptor { .. } => "INTERCEPTOR_FAILED",
            Self::Failed(_) => "FAILED",
        }
    }
}

/// Error raised by a log sink that could not accept a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("log sink rejected record: {0}")]
pub struct SinkError(pub String);

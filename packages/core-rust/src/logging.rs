//! Execution-time aspect.
//!
//! [`ExecutionTimeInterceptor`] samples a monotonic clock around `next`, then
//! hands an [`ExecutionRecord`] to the [`ExecutionLogger`] it was built with.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::error::{InvocationError, InvocationResult, SinkError};
use crate::interceptor::{Interceptor, Next};
use crate::operation::OperationDescriptor;

// ---------------------------------------------------------------------------
// ExecutionRecord
// ---------------------------------------------------------------------------

/// Whether the wrapped call returned a value or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Error,
}

impl Outcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Error => "error",
        }
    }

    fn of(result: &InvocationResult) -> Self {
        if result.is_ok() {
            Outcome::Ok
        } else {
            Outcome::Error
        }
    }
}

/// One timed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRecord {
    /// `Type.name(ArgType, ...)` of the invoked operation.
    pub signature: String,
    /// Exit instant minus entry instant.
    pub elapsed: Duration,
    pub outcome: Outcome,
}

impl ExecutionRecord {
    /// Elapsed time in whole milliseconds, saturating at `u64::MAX`.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

// ---------------------------------------------------------------------------
// ExecutionLogger
// ---------------------------------------------------------------------------

/// Sink for execution records.
pub trait ExecutionLogger: Send + Sync {
    /// Accepts one record.
    ///
    /// # Errors
    ///
    /// Returns `SinkError` if the record could not be written.
    fn log(&self, record: &ExecutionRecord) -> Result<(), SinkError>;
}

/// Emits each record as a structured `tracing` event at INFO.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ExecutionLogger for TracingLogger {
    fn log(&self, record: &ExecutionRecord) -> Result<(), SinkError> {
        info!(
            signature = %record.signature,
            elapsed_ms = record.elapsed_ms(),
            outcome = record.outcome.as_str(),
            "method executed"
        );
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct CapturingLogger {
    records: Mutex<Vec<ExecutionRecord>>,
}

impl CapturingLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<ExecutionRecord> {
        self.records.lock().clone()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl ExecutionLogger for CapturingLogger {
    fn log(&self, record: &ExecutionRecord) -> Result<(), SinkError> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ExecutionTimeInterceptor
// ---------------------------------------------------------------------------

/// Times the rest of the chain and logs one record per invocation.
///
/// The result is returned unmodified. If the sink fails after a successful
/// call the sink error is returned instead; after a failed call the original
/// failure wins and the sink error is only reported at WARN.
#[derive(Clone)]
pub struct ExecutionTimeInterceptor {
    logger: Arc<dyn ExecutionLogger>,
}

impl ExecutionTimeInterceptor {
    pub const NAME: &'static str = "log-execution-time";

    #[must_use]
    pub fn new(logger: Arc<dyn ExecutionLogger>) -> Self {
        Self { logger }
    }

    /// Interceptor backed by [`TracingLogger`].
    #[must_use]
    pub fn with_tracing() -> Self {
        Self::new(Arc::new(TracingLogger))
    }
}

impl std::fmt::Debug for ExecutionTimeInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionTimeInterceptor").finish_non_exhaustive()
    }
}

impl Interceptor for ExecutionTimeInterceptor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn intercept(&self, invocation: &OperationDescriptor, next: Next<'_>) -> InvocationResult {
        let start = Instant::now();
        let result = next.proceed();
        let elapsed = start.elapsed();

        let record = ExecutionRecord {
            signature: invocation.signature(),
            elapsed,
            outcome: Outcome::of(&result),
        };

        match (self.logger.log(&record), result) {
            (Ok(()), result) => result,
            (Err(sink), Ok(_)) => Err(InvocationError::Interceptor {
                interceptor: Self::NAME.to_string(),
                message: sink.to_string(),
            }),
            (Err(sink), Err(failure)) => {
                warn!(
                    signature = %record.signature,
                    error = %sink,
                    "execution record dropped"
                );
                Err(failure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::executor::invoke;
    use crate::interceptor::SharedInterceptor;
    use crate::operation::OperationId;
    use crate::types::Value;

    struct BrokenSink;

    impl ExecutionLogger for BrokenSink {
        fn log(&self, _record: &ExecutionRecord) -> Result<(), SinkError> {
            Err(SinkError("disk full".into()))
        }
    }

    fn lookup() -> OperationDescriptor {
        OperationDescriptor::new(
            OperationId::new("CustomerController", "info_by_path"),
            vec![Value::from("200257")],
        )
    }

    fn timed(logger: Arc<dyn ExecutionLogger>) -> Vec<SharedInterceptor> {
        vec![Arc::new(ExecutionTimeInterceptor::new(logger))]
    }

    #[test]
    fn outcome_names_are_lowercase() {
        assert_eq!(Outcome::Ok.as_str(), "ok");
        assert_eq!(Outcome::Error.as_str(), "error");
    }

    #[test]
    fn logs_signature_and_returns_result_unchanged() {
        let logger = Arc::new(CapturingLogger::new());
        let desc = lookup();

        let result = invoke(&desc, &timed(logger.clone()), |_| Ok(Value::from("OK")));

        assert_eq!(result, Ok(Value::from("OK")));
        let records = logger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].signature, "CustomerController.info_by_path(String)");
        assert_eq!(records[0].outcome, Outcome::Ok);
    }

    #[test]
    fn elapsed_covers_the_wrapped_call() {
        let logger = Arc::new(CapturingLogger::new());
        let desc = lookup();

        let outer = Instant::now();
        let _ = invoke(&desc, &timed(logger.clone()), |_| {
            thread::sleep(Duration::from_millis(20));
            Ok(Value::Null)
        });
        let outer = outer.elapsed();

        let record = &logger.records()[0];
        assert!(record.elapsed >= Duration::from_millis(20));
        assert!(record.elapsed <= outer);
    }

    #[test]
    fn failure_is_logged_and_propagated() {
        let logger = Arc::new(CapturingLogger::new());
        let desc = lookup();
        let failure = InvocationError::Failed("database offline".into());

        let result = invoke(&desc, &timed(logger.clone()), |_| {
            thread::sleep(Duration::from_millis(10));
            Err(failure.clone())
        });

        assert_eq!(result, Err(failure));
        let records = logger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].outcome, Outcome::Error);
        assert!(records[0].elapsed_ms() >= 10);
    }

    #[test]
    fn sink_failure_after_success_surfaces_as_interceptor_error() {
        let desc = lookup();
        let result = invoke(&desc, &timed(Arc::new(BrokenSink)), |_| Ok(Value::Null));

        assert_eq!(
            result,
            Err(InvocationError::Interceptor {
                interceptor: ExecutionTimeInterceptor::NAME.to_string(),
                message: "log sink rejected record: disk full".to_string(),
            })
        );
    }

    #[test]
    fn operation_failure_wins_over_sink_failure() {
        let desc = lookup();
        let result = invoke(&desc, &timed(Arc::new(BrokenSink)), |_| {
            Err(InvocationError::NotFound("200257".into()))
        });
        assert_eq!(result, Err(InvocationError::NotFound("200257".into())));
    }

    #[test]
    fn tracing_logger_accepts_records() {
        let record = ExecutionRecord {
            signature: "Svc.op()".into(),
            elapsed: Duration::from_millis(3),
            outcome: Outcome::Ok,
        };
        assert!(TracingLogger.log(&record).is_ok());
        assert_eq!(ExecutionTimeInterceptor::with_tracing().name(), "log-execution-time");
    }

    #[test]
    fn capturing_logger_clear_resets() {
        let logger = CapturingLogger::new();
        let record = ExecutionRecord {
            signature: "Svc.op()".into(),
            elapsed: Duration::ZERO,
            outcome: Outcome::Error,
        };
        logger.log(&record).unwrap();
        assert_eq!(logger.records().len(), 1);
        logger.clear();
        assert!(logger.records().is_empty());
    }

    #[test]
    fn elapsed_ms_truncates_sub_millisecond_time() {
        let record = ExecutionRecord {
            signature: String::new(),
            elapsed: Duration::from_micros(1_999),
            outcome: Outcome::Ok,
        };
        assert_eq!(record.elapsed_ms(), 1);
    }
}

//! Chain execution.
//!
//! [`invoke`] runs a chain around a real call. [`Dispatcher`] pairs it with a
//! frozen [`InterceptorRegistry`] so callers only supply the descriptor and
//! the real call.
//!
//! The executor is a pass-through: it never catches, retries, or times out.
//! Whatever the outermost interceptor returns is what the caller sees.

use std::sync::Arc;

use tracing::debug_span;

use crate::error::InvocationResult;
use crate::interceptor::{Next, SharedInterceptor};
use crate::operation::OperationDescriptor;
use crate::registry::InterceptorRegistry;

/// Runs `chain` around `real_call`.
///
/// Interceptor 0 is called with a continuation over interceptors `1..`; the
/// last continuation calls `real_call`. An empty chain calls `real_call`
/// directly.
///
/// # Errors
///
/// Returns whatever failure the chain produces: the real call's failure
/// unchanged, or one raised or substituted by an interceptor.
pub fn invoke<'a, F>(
    descriptor: &'a OperationDescriptor,
    chain: &'a [SharedInterceptor],
    real_call: F,
) -> InvocationResult
where
    F: FnOnce(&OperationDescriptor) -> InvocationResult + 'a,
{
    Next::new(descriptor, chain, Box::new(real_call)).proceed()
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Resolves an operation's chain from the registry and runs it.
///
/// Cloning is cheap: the registry is shared.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<InterceptorRegistry>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(registry: InterceptorRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    #[must_use]
    pub fn from_shared(registry: Arc<InterceptorRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &InterceptorRegistry {
        &self.registry
    }

    /// Runs the real call for `descriptor` through its registered chain.
    ///
    /// Operations that were never declared, or whose markers have no
    /// interceptors, run `real_call` directly.
    ///
    /// # Errors
    ///
    /// Propagates the failure returned by the chain, as [`invoke`] does.
    pub fn dispatch<F>(&self, descriptor: &OperationDescriptor, real_call: F) -> InvocationResult
    where
        F: FnOnce(&OperationDescriptor) -> InvocationResult,
    {
        let chain = self.registry.resolve_id(descriptor.id());
        let span = debug_span!(
            "invocation",
            operation = %descriptor.id(),
            interceptors = chain.len(),
        );
        let _entered = span.enter();
        invoke(descriptor, &chain, real_call)
    }
}

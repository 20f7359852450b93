//! The interceptor capability and the continuation handed to it.
//!
//! An interceptor receives the invocation and a [`Next`] continuation. Calling
//! [`Next::proceed`] runs the rest of the chain and finally the real operation.
//! `proceed` consumes the continuation, so it can run at most once; not calling
//! it short-circuits everything downstream.

use std::fmt;
use std::sync::Arc;

use crate::error::InvocationResult;
use crate::operation::OperationDescriptor;

/// Shared handle to an interceptor. The same instance serves every call to
/// every operation whose markers select it.
pub type SharedInterceptor = Arc<dyn Interceptor>;

/// Terminal step of a chain: the real operation.
pub(crate) type Target<'a> = Box<dyn FnOnce(&OperationDescriptor) -> InvocationResult + 'a>;

/// Cross-cutting logic wrapped around an operation call.
///
/// Implementations may run code before and after `next.proceed()`, replace
/// the result, convert a failure, or skip `proceed` entirely. They must not
/// keep per-call state between invocations: one instance is called
/// concurrently from many threads.
pub trait Interceptor: Send + Sync {
    /// Name used in logs and in `InvocationError::Interceptor`.
    fn name(&self) -> &str;

    /// Runs this interceptor around `next`.
    ///
    /// # Errors
    ///
    /// Returns the failure produced further down the chain, or one of the
    /// interceptor's own (for example `Denied` when it refuses the call).
    fn intercept(&self, invocation: &OperationDescriptor, next: Next<'_>) -> InvocationResult;
}

// ---------------------------------------------------------------------------
// Next
// ---------------------------------------------------------------------------

/// Continuation over the remainder of a chain.
pub struct Next<'a> {
    invocation: &'a OperationDescriptor,
    remaining: &'a [SharedInterceptor],
    target: Target<'a>,
}

impl<'a> Next<'a> {
    pub(crate) fn new(
        invocation: &'a OperationDescriptor,
        remaining: &'a [SharedInterceptor],
        target: Target<'a>,
    ) -> Self {
        Self {
            invocation,
            remaining,
            target,
        }
    }

    /// Runs the next interceptor, or the real operation once the chain is exhausted.
    ///
    /// # Errors
    ///
    /// Returns the failure of the remaining chain or the real operation.
    pub fn proceed(self) -> InvocationResult {
        let Next {
            invocation,
            remaining,
            target,
        } = self;
        match remaining.split_first() {
            Some((head, rest)) => head.intercept(invocation, Next::new(invocation, rest, target)),
            None => target(invocation),
        }
    }

    /// Number of interceptors still ahead of the real operation.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("operation", self.invocation.id())
            .field("remaining", &self.remaining.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// FnInterceptor
// ---------------------------------------------------------------------------

/// Interceptor built from a closure.
///
/// ```
/// use aspectkit_core::{FnInterceptor, Next, OperationDescriptor, Value};
///
/// let upper = FnInterceptor::new("uppercase", |_inv: &OperationDescriptor, next: Next<'_>| {
///     let value = next.proceed()?;
///     Ok(match value {
///         Value::String(s) => Value::String(s.to_uppercase()),
///         other => other,
///     })
/// });
/// # let _ = upper;
/// ```
pub struct FnInterceptor<F> {
    name: String,
    func: F,
}

impl<F> FnInterceptor<F>
where
    F: Fn(&OperationDescriptor, Next<'_>) -> InvocationResult + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Interceptor for FnInterceptor<F>
where
    F: Fn(&OperationDescriptor, Next<'_>) -> InvocationResult + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn intercept(&self, invocation: &OperationDescriptor, next: Next<'_>) -> InvocationResult {
        (self.func)(invocation, next)
    }
}

impl<F> fmt::Debug for FnInterceptor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnInterceptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::OperationId;
    use crate::types::Value;

    fn descriptor() -> OperationDescriptor {
        OperationDescriptor::new(OperationId::new("Greeter", "hello"), vec![Value::from("bob")])
    }

    #[test]
    fn next_without_interceptors_runs_target() {
        let inv = descriptor();
        let next = Next::new(
            &inv,
            &[],
            Box::new(|inv: &OperationDescriptor| Ok(inv.args()[0].clone())),
        );
        assert_eq!(next.remaining(), 0);
        assert_eq!(next.proceed(), Ok(Value::from("bob")));
    }

    #[test]
    fn fn_interceptor_can_rewrite_result() {
        let chain: Vec<SharedInterceptor> = vec![Arc::new(FnInterceptor::new(
            "shout",
            |_inv: &OperationDescriptor, next: Next<'_>| {
                let value = next.proceed()?;
                Ok(Value::from(format!("{}!", value.as_str().unwrap_or_default())))
            },
        ))];
        let inv = descriptor();
        let next = Next::new(&inv, &chain, Box::new(|_: &OperationDescriptor| Ok(Value::from("hi"))));
        assert_eq!(next.remaining(), 1);
        assert_eq!(next.proceed(), Ok(Value::from("hi!")));
        assert_eq!(chain[0].name(), "shout");
    }

    #[test]
    fn debug_output_names_operation() {
        let inv = descriptor();
        let next = Next::new(&inv, &[], Box::new(|_: &OperationDescriptor| Ok(Value::Null)));
        let rendered = format!("{next:?}");
        assert!(rendered.contains("remaining: 0"));
    }
}

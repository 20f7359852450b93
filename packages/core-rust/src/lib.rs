//! `AspectKit` Core: operation descriptors, marker registry, and interceptor chains.
//!
//! Startup code declares operations and binds interceptors to markers through a
//! [`RegistryBuilder`]; the frozen [`InterceptorRegistry`] is then shared by a
//! [`Dispatcher`] that runs each call through its chain.

pub mod error;
pub mod executor;
pub mod interceptor;
pub mod logging;
pub mod marker;
pub mod operation;
pub mod registry;
pub mod types;

pub use error::{InvocationError, InvocationResult, SinkError};
pub use executor::{invoke, Dispatcher};
pub use interceptor::{FnInterceptor, Interceptor, Next, SharedInterceptor};
pub use logging::{
    CapturingLogger, ExecutionLogger, ExecutionRecord, ExecutionTimeInterceptor, Outcome,
    TracingLogger,
};
pub use marker::Marker;
pub use operation::{OperationDeclaration, OperationDescriptor, OperationId};
pub use registry::{Chain, InterceptorRegistry, RegistryBuilder};
pub use types::Value;


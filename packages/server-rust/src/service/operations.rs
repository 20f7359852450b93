//! Operation table: which endpoint operations exist and which markers they carry.
//!
//! Every customer lookup carries `@LogExecutionTime`; SMS send carries no
//! marker and therefore runs without interception.

use std::sync::Arc;

use aspectkit_core::{
    ExecutionLogger, ExecutionTimeInterceptor, InterceptorRegistry, InvocationError, Marker,
    OperationDeclaration, OperationDescriptor, OperationId, RegistryBuilder,
};

pub const CUSTOMER_INFO_BY_PATH: OperationId =
    OperationId::new("CustomerController", "info_by_path");
pub const CUSTOMER_INFO_BY_QUERY: OperationId =
    OperationId::new("CustomerController", "info_by_query");
pub const CUSTOMER_COMBINED_INFO: OperationId =
    OperationId::new("CustomerController", "combined_info");
pub const SMS_SEND: OperationId = OperationId::new("SmsController", "send");

/// Declarations for every operation exposed over HTTP.
#[must_use]
pub fn declarations() -> Vec<OperationDeclaration> {
    vec![
        OperationDeclaration::new(CUSTOMER_INFO_BY_PATH).marked(Marker::LOG_EXECUTION_TIME),
        OperationDeclaration::new(CUSTOMER_INFO_BY_QUERY).marked(Marker::LOG_EXECUTION_TIME),
        OperationDeclaration::new(CUSTOMER_COMBINED_INFO).marked(Marker::LOG_EXECUTION_TIME),
        OperationDeclaration::new(SMS_SEND),
    ]
}

/// Builds the frozen registry: the execution-time interceptor on
/// `@LogExecutionTime`, plus every declaration above.
#[must_use]
pub fn build_registry(logger: Arc<dyn ExecutionLogger>) -> InterceptorRegistry {
    let mut builder = RegistryBuilder::new();
    builder.register(Marker::LOG_EXECUTION_TIME, ExecutionTimeInterceptor::new(logger));
    for declaration in declarations() {
        builder.declare(declaration);
    }
    builder.build()
}

/// Reads argument `index` of `invocation` as a string.
///
/// # Errors
///
/// Returns `InvalidArgument` naming `name` if the argument is missing or not a string.
pub fn string_arg<'a>(
    invocation: &'a OperationDescriptor,
    index: usize,
    name: &str,
) -> Result<&'a str, InvocationError> {
    invocation
        .arg(index)
        .and_then(aspectkit_core::Value::as_str)
        .ok_or_else(|| InvocationError::invalid_argument(name, "expected a string argument"))
}

#[cfg(test)]
mod tests {
    use aspectkit_core::{CapturingLogger, Value};

    use super::*;

    fn registry() -> InterceptorRegistry {
        build_registry(Arc::new(CapturingLogger::new()))
    }

    #[test]
    fn customer_operations_are_timed() {
        let registry = registry();
        for id in [CUSTOMER_INFO_BY_PATH, CUSTOMER_INFO_BY_QUERY, CUSTOMER_COMBINED_INFO] {
            let chain = registry.resolve_id(&id);
            assert_eq!(chain.len(), 1, "{id} should carry one interceptor");
            assert_eq!(chain[0].name(), ExecutionTimeInterceptor::NAME);
        }
    }

    #[test]
    fn sms_send_is_declared_without_markers() {
        let registry = registry();
        assert!(registry.resolve_id(&SMS_SEND).is_empty());
        assert!(registry.declaration(&SMS_SEND).unwrap().markers().is_empty());
    }

    #[test]
    fn all_declared_ids_are_distinct() {
        let decls = declarations();
        for (i, a) in decls.iter().enumerate() {
            for b in &decls[i + 1..] {
                assert_ne!(a.id(), b.id());
            }
        }
    }

    #[test]
    fn string_arg_reads_and_validates() {
        let desc = OperationDescriptor::new(
            CUSTOMER_INFO_BY_QUERY,
            vec![Value::from("991"), Value::Int(3)],
        );
        assert_eq!(string_arg(&desc, 0, "nic"), Ok("991"));
        assert!(matches!(
            string_arg(&desc, 1, "name"),
            Err(InvocationError::InvalidArgument { name, .. }) if name == "name"
        ));
        assert!(string_arg(&desc, 2, "extra").is_err());
    }
}

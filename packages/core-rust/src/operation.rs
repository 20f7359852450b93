//! Operation identity, startup declarations, and per-call descriptors.

use std::borrow::Cow;
use std::fmt;

use crate::marker::Marker;
use crate::types::Value;

// ---------------------------------------------------------------------------
// OperationId
// ---------------------------------------------------------------------------

/// Identifies a callable unit by its declaring type and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationId {
    declaring_type: Cow<'static, str>,
    name: Cow<'static, str>,
}

impl OperationId {
    /// Creates an id from static names. Usable in `const` items.
    #[must_use]
    pub const fn new(declaring_type: &'static str, name: &'static str) -> Self {
        Self {
            declaring_type: Cow::Borrowed(declaring_type),
            name: Cow::Borrowed(name),
        }
    }

    /// Creates an id from owned names, e.g. when operations are discovered at runtime.
    pub fn owned(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            declaring_type: Cow::Owned(declaring_type.into()),
            name: Cow::Owned(name.into()),
        }
    }

    #[must_use]
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.name)
    }
}

// ---------------------------------------------------------------------------
// OperationDeclaration
// ---------------------------------------------------------------------------

/// Startup-time declaration of an operation and the markers it carries.
///
/// Markers are kept in declaration order; the registry concatenates their
/// chains in that order when resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDeclaration {
    id: OperationId,
    markers: Vec<Marker>,
}

impl OperationDeclaration {
    /// Declares an operation with no markers.
    #[must_use]
    pub fn new(id: OperationId) -> Self {
        Self {
            id,
            markers: Vec::new(),
        }
    }

    /// Adds a marker after any already present. Duplicate markers are ignored.
    #[must_use]
    pub fn marked(mut self, marker: Marker) -> Self {
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }

    #[must_use]
    pub fn id(&self) -> &OperationId {
        &self.id
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

// ---------------------------------------------------------------------------
// OperationDescriptor
// ---------------------------------------------------------------------------

/// A single invocation: which operation is being called, with which arguments.
///
/// Created fresh for every call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    id: OperationId,
    args: Vec<Value>,
}

impl OperationDescriptor {
    #[must_use]
    pub fn new(id: OperationId, args: Vec<Value>) -> Self {
        Self { id, args }
    }

    #[must_use]
    pub fn id(&self) -> &OperationId {
        &self.id
    }

    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Returns the argument at `index`, if present.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// Renders `Type.name(ArgType, ...)` from the argument value kinds.
    #[must_use]
    pub fn signature(&self) -> String {
        let params: Vec<&str> = self.args.iter().map(Value::type_name).collect();
        format!("{}({})", self.id, params.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOOKUP: OperationId = OperationId::new("CustomerController", "info_by_path");

    #[test]
    fn id_displays_type_and_name() {
        assert_eq!(LOOKUP.to_string(), "CustomerController.info_by_path");
        assert_eq!(LOOKUP.declaring_type(), "CustomerController");
        assert_eq!(LOOKUP.name(), "info_by_path");
    }

    #[test]
    fn static_and_owned_ids_are_equal() {
        assert_eq!(
            LOOKUP,
            OperationId::owned("CustomerController", "info_by_path")
        );
    }

    #[test]
    fn declaration_keeps_marker_order_and_drops_duplicates() {
        let audit = Marker::new("Audit");
        let decl = OperationDeclaration::new(LOOKUP)
            .marked(audit.clone())
            .marked(Marker::LOG_EXECUTION_TIME)
            .marked(audit.clone());
        assert_eq!(decl.markers(), &[audit, Marker::LOG_EXECUTION_TIME]);
    }

    #[test]
    fn signature_lists_argument_kinds() {
        let desc = OperationDescriptor::new(
            OperationId::new("CustomerController", "info_by_query"),
            vec![Value::from("991"), Value::from("yasiya")],
        );
        assert_eq!(
            desc.signature(),
            "CustomerController.info_by_query(String, String)"
        );
    }

    #[test]
    fn signature_of_nullary_operation() {
        let desc = OperationDescriptor::new(OperationId::new("Clock", "now"), vec![]);
        assert_eq!(desc.signature(), "Clock.now()");
        assert!(desc.arg(0).is_none());
    }
}

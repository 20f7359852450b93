use std::borrow::Cow;
use std::fmt;

/// Tag attached to an operation declaration, selecting which interceptor
/// chain applies to it.
///
/// Many operations may share one marker; each marker maps to exactly one
/// ordered chain in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Marker(Cow<'static, str>);

impl Marker {
    /// Marker for operations whose execution time is logged.
    pub const LOG_EXECUTION_TIME: Marker = Marker::from_static("LogExecutionTime");

    /// Creates a marker from a static name without allocating.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a marker from an owned name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the marker name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

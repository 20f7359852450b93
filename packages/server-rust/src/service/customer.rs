//! Customer lookup operations.

use aspectkit_core::{InvocationError, Value};

/// Customer returned by every lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub nic: String,
}

impl From<Customer> for Value {
    fn from(customer: Customer) -> Self {
        Value::map([
            ("name", Value::String(customer.name)),
            ("nic", Value::String(customer.nic)),
        ])
    }
}

/// Builds customers from the identifiers supplied by the caller.
///
/// There is no backing store: lookups echo the national identity card
/// number (`nic`) back with either the supplied name or the configured
/// default name.
#[derive(Debug, Clone)]
pub struct CustomerController {
    default_name: String,
}

impl CustomerController {
    pub fn new(default_name: impl Into<String>) -> Self {
        Self {
            default_name: default_name.into(),
        }
    }

    #[must_use]
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Lookup by `nic` alone; the name is the configured default.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `nic` is blank.
    pub fn info_by_path(&self, nic: &str) -> Result<Customer, InvocationError> {
        Ok(Customer {
            name: self.default_name.clone(),
            nic: require("nic", nic)?.to_string(),
        })
    }

    /// Lookup with both fields supplied as query parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if either field is blank.
    pub fn info_by_query(&self, nic: &str, name: &str) -> Result<Customer, InvocationError> {
        Ok(Customer {
            name: require("name", name)?.to_string(),
            nic: require("nic", nic)?.to_string(),
        })
    }

    /// Lookup with `nic` from the path and `name` from the query string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if either field is blank.
    pub fn combined_info(&self, nic: &str, name: &str) -> Result<Customer, InvocationError> {
        self.info_by_query(nic, name)
    }
}

/// Rejects blank input; anything else is returned exactly as given.
fn require<'a>(field: &str, value: &'a str) -> Result<&'a str, InvocationError> {
    if value.trim().is_empty() {
        return Err(InvocationError::invalid_argument(field, "must not be blank"));
    }
    Ok(value)
}

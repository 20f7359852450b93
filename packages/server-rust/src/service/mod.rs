//! Endpoint operations and the table that binds them to interceptor chains.
//!
//! 1. **Controllers** (`customer`, `sms`): the real operations, plain synchronous calls
//! 2. **Operation table** (`operations`): ids, marker declarations, registry construction

pub mod customer;
pub mod operations;
pub mod sms;

pub use customer::{Customer, CustomerController};
pub use operations::build_registry;
pub use sms::SmsController;

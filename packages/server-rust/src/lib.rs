//! `AspectKit` Server: customer and SMS endpoints dispatched through interceptor chains.

pub mod config;
pub mod network;
pub mod service;
pub mod telemetry;

pub use config::{Cli, ServerConfig};
pub use network::NetworkModule;

//! HTTP pinning service.
//!
//! This crate wires the pinning core into a running service:
//! - Configuration (TOML file plus command-line overrides)
//! - State management (ServiceState owning the pinner and its stores)
//! - HTTP handlers (pin routes, health checks)

pub mod config;
pub mod http;
pub mod state;

// Re-export key types for convenience
pub use config::{Config, ConfigError};
pub use state::{State as ServiceState, StateSetupError};

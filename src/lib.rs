//! Control plane health guard for a network sidecar.
//!
//! Watches control plane reachability and tears down traffic interception
//! rules when it is lost, rebuilding them once it is back.

pub mod admin;
pub mod config;
pub mod health;
pub mod intercept;
pub mod lifecycle;
pub mod observability;

pub use config::ProxyConfig;
pub use health::{HealthHandle, HealthMonitor, HealthState};
pub use lifecycle::Shutdown;

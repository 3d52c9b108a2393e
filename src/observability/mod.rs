//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Health monitor, probe, interceptor produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → stdout (plain or JSON)
//!     → admin /metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;

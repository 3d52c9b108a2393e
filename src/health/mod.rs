//! Control plane health subsystem.
//!
//! # Data Flow
//! ```text
//! Monitor loop (monitor.rs):
//!     Fixed delay between iterations
//!     → Burst of up to 5 probes (probe.rs)
//!     → Confirmed flip updates state.rs
//!     → Flip triggers interception enable/disable
//!
//! State (state.rs):
//!     Ready ←→ NotReady
//!     Shared via HealthHandle (readiness query, forced degrade)
//! ```
//!
//! # Design Decisions
//! - Hysteresis: a flip needs 5 consecutive "bad for current state" probes
//! - Any single contrary probe aborts the burst
//! - Exactly one interception action per confirmed flip

pub mod monitor;
pub mod probe;
pub mod state;

pub use monitor::{
    BurstOutcome, HealthMonitor, ProbeOutcome, BURST_ATTEMPTS, ITERATION_DELAY, PROBE_SPACING,
};
pub use probe::{status_url, HttpProbe, Probe, ProbeError, PROBE_TIMEOUT, STATUS_PORT};
pub use state::{HealthHandle, HealthState};

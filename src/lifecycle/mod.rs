//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve config → Build interceptor → Health handle → Spawn monitor + admin
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Broadcast → Monitor exits at next blocking point
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;

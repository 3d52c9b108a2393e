//! Traffic interception control.
//!
//! # Data Flow
//! ```text
//! Confirmed health flip / forced degrade
//!     → Interceptor::enable() / Interceptor::disable()
//!     → command.rs launches the privileged helper, detached
//!     → helper installs or removes the redirection rules
//! ```
//!
//! # Design Decisions
//! - Fire-and-forget: callers never wait for the helper
//! - Launch failures are logged, never retried or escalated
//! - Rule convergence is the helper's job

pub mod command;
pub mod recording;

use std::fmt;

use thiserror::Error;

pub use command::{CommandInterceptor, DEFAULT_DISABLE_COMMAND, DEFAULT_ENABLE_COMMAND};
pub use recording::RecordingInterceptor;

/// Which way the interception rules are moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Enable,
    Disable,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Enable => write!(f, "enable"),
            Action::Disable => write!(f, "disable"),
        }
    }
}

#[derive(Debug, Error)]
pub enum InterceptError {
    #[error("failed to {action} interception rules: {source}")]
    Launch {
        action: Action,
        #[source]
        source: std::io::Error,
    },
}

/// Applies or removes traffic interception rules.
///
/// Both operations return immediately and must tolerate repeated or
/// concurrent calls.
pub trait Interceptor: Send + Sync {
    /// Install interception rules.
    fn enable(&self);

    /// Remove interception rules.
    fn disable(&self);
}

//! Control plane health monitor loop.
//!
//! # Responsibilities
//! - Periodically probe the control plane in bursts
//! - Confirm or reject a pending flip of the health state
//! - Enable/disable interception on confirmed flips
//!
//! # Design Decisions
//! - One burst per iteration, chosen by the current state
//! - A burst stops at the first probe that argues for staying put
//! - Shutdown is observed at every probe and every delay

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::health::probe::Probe;
use crate::health::state::{HealthHandle, HealthState};

/// Probes per burst; all of them must agree for a flip.
pub const BURST_ATTEMPTS: usize = 5;

/// Pause after each probe that counts towards a flip.
pub const PROBE_SPACING: Duration = Duration::from_secs(2);

/// Pause between loop iterations.
pub const ITERATION_DELAY: Duration = Duration::from_secs(2);

/// Outcome of a single probe, as seen by a burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success,
    Failure,
}

/// How a burst ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstOutcome {
    /// Every attempt produced the bad outcome; the flip is confirmed.
    Exhausted,
    /// An attempt produced the opposite outcome; no flip.
    Aborted,
    /// Shutdown was signalled mid-burst.
    Cancelled,
}

/// Drives the Ready/NotReady state machine.
pub struct HealthMonitor<P> {
    probe: P,
    health: HealthHandle,
}

impl<P: Probe> HealthMonitor<P> {
    pub fn new(probe: P, health: HealthHandle) -> Self {
        Self { probe, health }
    }

    /// Handle sharing this monitor's state.
    pub fn handle(&self) -> HealthHandle {
        self.health.clone()
    }

    /// Run until `shutdown` fires.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            attempts = BURST_ATTEMPTS,
            spacing_secs = PROBE_SPACING.as_secs(),
            "Control plane health monitor starting"
        );

        loop {
            if self.step(&mut shutdown).await == BurstOutcome::Cancelled {
                break;
            }
            if !pause(&mut shutdown, ITERATION_DELAY).await {
                break;
            }
        }

        tracing::info!("Health monitor received shutdown signal, exiting loop");
    }

    /// One loop iteration: a single burst for the current state and, if it
    /// was exhausted, the matching transition.
    pub async fn step(&self, shutdown: &mut broadcast::Receiver<()>) -> BurstOutcome {
        match self.health.state() {
            HealthState::Ready => {
                let outcome = self.burst(ProbeOutcome::Failure, shutdown).await;
                if outcome == BurstOutcome::Exhausted {
                    if self.health.transition(HealthState::Ready, HealthState::NotReady) {
                        tracing::error!(
                            attempts = BURST_ATTEMPTS,
                            "Control plane unreachable, removing interception rules"
                        );
                    } else {
                        tracing::debug!("State changed during burst, skipping degrade");
                    }
                }
                outcome
            }
            HealthState::NotReady => {
                let outcome = self.burst(ProbeOutcome::Success, shutdown).await;
                if outcome == BurstOutcome::Exhausted {
                    if self.health.transition(HealthState::NotReady, HealthState::Ready) {
                        tracing::info!(
                            attempts = BURST_ATTEMPTS,
                            "Control plane reachable again, rebuilding interception rules"
                        );
                    } else {
                        tracing::debug!("State changed during burst, skipping recovery");
                    }
                }
                outcome
            }
        }
    }

    /// Probe up to [`BURST_ATTEMPTS`] times while every result equals `bad`.
    ///
    /// Each bad result is followed by [`PROBE_SPACING`].
    pub async fn burst(
        &self,
        bad: ProbeOutcome,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> BurstOutcome {
        for attempt in 1..=BURST_ATTEMPTS {
            let result = tokio::select! {
                result = self.probe.probe() => result,
                _ = shutdown.recv() => return BurstOutcome::Cancelled,
            };

            let outcome = match &result {
                Ok(()) => ProbeOutcome::Success,
                Err(_) => ProbeOutcome::Failure,
            };
            if outcome != bad {
                tracing::debug!(attempt, ?outcome, "Burst aborted");
                return BurstOutcome::Aborted;
            }

            match result {
                Err(e) => tracing::warn!(attempt, error = %e, "Control plane probe failed"),
                Ok(()) => tracing::info!(attempt, "Control plane probe succeeded"),
            }

            if !pause(shutdown, PROBE_SPACING).await {
                return BurstOutcome::Cancelled;
            }
        }

        BurstOutcome::Exhausted
    }
}

/// Sleep for `delay`; false if shutdown fired first.
async fn pause(shutdown: &mut broadcast::Receiver<()>, delay: Duration) -> bool {
    tokio::select! {
        _ = time::sleep(delay) => true,
        _ = shutdown.recv() => false,
    }
}

//! Metrics collection and exposition.
//!
//! # Metrics
//! - `control_plane_ready` (gauge): 1=ready, 0=not ready
//! - `control_plane_probes_total` (counter): probes by result
//! - `control_plane_transitions_total` (counter): confirmed flips by target state
//! - `interception_launches_total` (counter): helper launches by action, result
//!
//! Without an installed recorder every call is a no-op.

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::health::HealthState;
use crate::intercept::Action;

/// Install the Prometheus recorder and return the handle used for rendering.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

pub fn record_health_state(state: HealthState) {
    let value = match state {
        HealthState::Ready => 1.0,
        HealthState::NotReady => 0.0,
    };
    gauge!("control_plane_ready").set(value);
}

pub fn record_transition(to: HealthState) {
    counter!("control_plane_transitions_total", "to" => to.to_string()).increment(1);
}

pub fn record_probe(success: bool) {
    let result = if success { "success" } else { "failure" };
    counter!("control_plane_probes_total", "result" => result).increment(1);
}

pub fn record_launch(action: Action, launched: bool) {
    let result = if launched { "launched" } else { "error" };
    counter!(
        "interception_launches_total",
        "action" => action.to_string(),
        "result" => result
    )
    .increment(1);
}

//! Local admin surface.
//!
//! - `GET /ready`: 200 when the control plane is reachable, 503 otherwise
//! - `GET /status`: JSON summary
//! - `POST /force-failed`: force a degrade
//! - `GET /metrics`: Prometheus exposition, when a recorder is installed

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::health::HealthHandle;
use self::handlers::*;

/// State shared by the admin handlers.
#[derive(Clone)]
pub struct AdminState {
    health: HealthHandle,
    discovery_address: String,
    metrics: Option<PrometheusHandle>,
}

impl AdminState {
    pub fn new(health: HealthHandle, discovery_address: String) -> Self {
        Self {
            health,
            discovery_address,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: PrometheusHandle) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn discovery_address(&self) -> &str {
        &self.discovery_address
    }
}

pub fn setup_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/ready", get(get_ready))
        .route("/status", get(get_status))
        .route("/force-failed", post(force_failed))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

/// Serve the admin router until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    state: AdminState,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(address = %addr, "Admin server listening");
    }

    axum::serve(listener, setup_admin_router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await
}

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::admin::AdminState;

#[derive(Debug, Serialize)]
pub struct AgentStatus {
    pub version: &'static str,
    pub state: String,
    pub ready: bool,
    pub discovery_address: String,
}

pub async fn get_ready(State(state): State<AdminState>) -> (StatusCode, &'static str) {
    if state.health.is_ready() {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    }
}

pub async fn get_status(State(state): State<AdminState>) -> Json<AgentStatus> {
    let health = state.health.state();
    Json(AgentStatus {
        version: env!("CARGO_PKG_VERSION"),
        state: health.to_string(),
        ready: state.health.is_ready(),
        discovery_address: state.discovery_address.clone(),
    })
}

pub async fn force_failed(State(state): State<AdminState>) -> Json<AgentStatus> {
    state.health.force_failed();
    get_status(State(state)).await
}

pub async fn get_metrics(State(state): State<AdminState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}

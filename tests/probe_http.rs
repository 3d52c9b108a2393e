//! HTTP probe classification against a live mock control plane.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use sidecar_health::health::{BurstOutcome, HealthMonitor, HttpProbe, Probe, ProbeError};
use sidecar_health::intercept::RecordingInterceptor;
use sidecar_health::{HealthHandle, HealthState, Shutdown};

mod common;

#[tokio::test]
async fn test_success_statuses() {
    for status in [200, 404] {
        let addr = common::start_status_backend(status).await;
        let probe = HttpProbe::with_url(format!("http://{}", addr));
        assert!(probe.probe().await.is_ok(), "status {} should be healthy", status);
    }
}

#[tokio::test]
async fn test_server_error_statuses() {
    for status in [500, 503] {
        let addr = common::start_status_backend(status).await;
        let probe = HttpProbe::with_url(format!("http://{}", addr));
        match probe.probe().await {
            Err(ProbeError::ServerError { status: got, .. }) => assert_eq!(got, status),
            other => panic!("expected server error for {}, got {:?}", status, other),
        }
    }
}

#[tokio::test]
async fn test_connection_refused() {
    let addr = common::closed_addr().await;
    let probe = HttpProbe::with_url(format!("http://{}", addr));
    assert!(matches!(probe.probe().await, Err(ProbeError::Transport { .. })));
}

#[tokio::test]
async fn test_probe_times_out() {
    let addr = common::start_programmable_backend(|| async {
        tokio::time::sleep(Duration::from_secs(30)).await;
        (200, "late".to_string())
    })
    .await;
    let probe = HttpProbe::with_url(format!("http://{}", addr));

    let start = Instant::now();
    assert!(matches!(probe.probe().await, Err(ProbeError::Timeout { .. })));
    assert!(start.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_control_plane_outage_degrades() {
    let healthy = Arc::new(AtomicBool::new(false));
    let h = healthy.clone();
    let addr = common::start_programmable_backend(move || {
        let h = h.clone();
        async move {
            if h.load(Ordering::SeqCst) {
                (200, "ok".into())
            } else {
                (503, "down".into())
            }
        }
    })
    .await;

    let recorder = Arc::new(RecordingInterceptor::default());
    let health = HealthHandle::new(recorder.clone());
    let monitor = HealthMonitor::new(HttpProbe::with_url(format!("http://{}", addr)), health.clone());
    let shutdown = Shutdown::new();
    let mut rx = shutdown.subscribe();

    assert_eq!(monitor.step(&mut rx).await, BurstOutcome::Exhausted);
    assert_eq!(health.state(), HealthState::NotReady);
    assert_eq!(recorder.disables(), 1);

    healthy.store(true, Ordering::SeqCst);
    assert_eq!(monitor.step(&mut rx).await, BurstOutcome::Exhausted);
    assert_eq!(health.state(), HealthState::Ready);
    assert_eq!(recorder.enables(), 1);
}

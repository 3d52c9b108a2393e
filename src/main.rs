//! Control plane health guard (sidecar agent).
//!
//! # Architecture Overview
//!
//! ```text
//!   PROXY_CONFIG ──▶ config ──▶ discovery address
//!                                    │
//!                                    ▼
//!   ┌────────────────────────── health monitor ──────────────────────────┐
//!   │  every 2s: burst of ≤5 probes ──▶ GET http://<host>:15014          │
//!   │  Ready    + 5 failures  ──▶ NotReady, intercept disable            │
//!   │  NotReady + 5 successes ──▶ Ready,    intercept enable             │
//!   └────────────────────────────────────────────────────────────────────┘
//!                                    │
//!   admin (/ready, /status, /force-failed, /metrics) ◀── health handle
//! ```

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;

use sidecar_health::admin;
use sidecar_health::config::ProxyConfig;
use sidecar_health::intercept::{DEFAULT_DISABLE_COMMAND, DEFAULT_ENABLE_COMMAND};
use sidecar_health::lifecycle::signals::wait_for_signal;
use sidecar_health::lifecycle::startup::{Agent, InterceptOptions};
use sidecar_health::lifecycle::Shutdown;
use sidecar_health::observability::logging::{init_logging, LogFormat};
use sidecar_health::observability::metrics;

#[derive(Parser)]
#[command(name = "sidecar-health")]
#[command(about = "Guards sidecar traffic interception on control plane reachability", long_about = None)]
struct Cli {
    /// Admin API bind address
    #[arg(long, env = "HEALTH_ADMIN_ADDRESS", default_value = "127.0.0.1:15099")]
    admin_address: SocketAddr,

    /// Do not start the admin API
    #[arg(long)]
    no_admin: bool,

    /// Log output format
    #[arg(long, value_enum, env = "HEALTH_LOG_FORMAT", default_value = "plain")]
    log_format: LogFormat,

    /// Command that installs interception rules
    #[arg(long, default_value = DEFAULT_ENABLE_COMMAND)]
    enable_command: String,

    /// Command that removes interception rules
    #[arg(long, default_value = DEFAULT_DISABLE_COMMAND)]
    disable_command: String,

    /// Log interception actions instead of running them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_format)?;

    tracing::info!("sidecar-health v{} starting", env!("CARGO_PKG_VERSION"));

    // Recorder goes in before anything records
    let metrics_handle = if cli.no_admin {
        None
    } else {
        metrics::init_metrics()
            .map_err(|e| tracing::error!(error = %e, "Failed to install metrics recorder"))
            .ok()
    };

    let config = ProxyConfig::from_env();
    let options = InterceptOptions {
        enable_command: cli.enable_command,
        disable_command: cli.disable_command,
        dry_run: cli.dry_run,
    };
    let agent = Agent::new(config, &options);
    let shutdown = Shutdown::new();

    let admin_task = if cli.no_admin {
        None
    } else {
        let mut state = agent.admin_state();
        if let Some(handle) = metrics_handle {
            state = state.with_metrics(handle);
        }

        let listener = TcpListener::bind(cli.admin_address).await?;
        let admin_shutdown = shutdown.subscribe();
        Some(tokio::spawn(async move {
            if let Err(e) = admin::serve(listener, state, admin_shutdown).await {
                tracing::error!(error = %e, "Admin server failed");
            }
        }))
    };

    let monitor_task = tokio::spawn(agent.monitor.run(shutdown.subscribe()));

    wait_for_signal().await;
    tracing::info!("Shutting down");
    shutdown.trigger();

    monitor_task.await?;
    if let Some(task) = admin_task {
        task.await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

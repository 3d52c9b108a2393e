//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the proxy configuration
//! - Choose the interceptor (real helper commands or dry run)
//! - Wire the health handle, monitor and admin state together
//!
//! # Design Decisions
//! - Config resolution cannot fail; a bad override degrades to defaults
//! - The health state starts Ready before the monitor runs

use std::sync::Arc;

use crate::admin::AdminState;
use crate::config::ProxyConfig;
use crate::health::{HealthHandle, HealthMonitor, HttpProbe};
use crate::intercept::{CommandInterceptor, Interceptor, RecordingInterceptor};

/// How interception should be performed.
#[derive(Debug, Clone)]
pub struct InterceptOptions {
    pub enable_command: String,
    pub disable_command: String,
    /// Log actions instead of launching helpers.
    pub dry_run: bool,
}

/// Fully wired agent, ready to run.
pub struct Agent {
    pub config: ProxyConfig,
    pub health: HealthHandle,
    pub monitor: HealthMonitor<HttpProbe>,
}

impl Agent {
    /// Build the agent from a resolved configuration.
    pub fn new(config: ProxyConfig, options: &InterceptOptions) -> Self {
        let interceptor = build_interceptor(options);
        let health = HealthHandle::new(interceptor);
        let probe = HttpProbe::new(&config.discovery_address);

        tracing::info!(
            discovery_address = %config.discovery_address,
            status_url = %probe.url(),
            dry_run = options.dry_run,
            "Health agent configured"
        );

        let monitor = HealthMonitor::new(probe, health.clone());
        Self {
            config,
            health,
            monitor,
        }
    }

    /// State shared with the admin router.
    pub fn admin_state(&self) -> AdminState {
        AdminState::new(self.health.clone(), self.config.discovery_address.clone())
    }
}

fn build_interceptor(options: &InterceptOptions) -> Arc<dyn Interceptor> {
    if options.dry_run {
        Arc::new(RecordingInterceptor::default())
    } else {
        Arc::new(CommandInterceptor::new(
            options.enable_command.clone(),
            options.disable_command.clone(),
        ))
    }
}

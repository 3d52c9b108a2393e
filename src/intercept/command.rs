//! Interception through external helper commands.

use std::process::{Command, Stdio};
use std::thread;

use crate::intercept::{Action, InterceptError, Interceptor};
use crate::observability::metrics;

/// Installs the redirection rules.
pub const DEFAULT_ENABLE_COMMAND: &str = "sudo /usr/local/bin/pilot-agent istio-iptables";

/// Removes the redirection rules.
pub const DEFAULT_DISABLE_COMMAND: &str = "sudo /usr/local/bin/pilot-agent istio-clean-iptables";

const DEFAULT_SHELL: &str = "/bin/sh";

/// Runs shell commands to toggle interception.
///
/// Callable from any thread, with or without a Tokio runtime. The exit status of
/// each helper is collected by a short-lived reaper thread.
#[derive(Debug, Clone)]
pub struct CommandInterceptor {
    shell: String,
    enable_command: String,
    disable_command: String,
}

impl CommandInterceptor {
    pub fn new(enable_command: impl Into<String>, disable_command: impl Into<String>) -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
            enable_command: enable_command.into(),
            disable_command: disable_command.into(),
        }
    }

    /// Use a different shell to run the commands.
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    fn command_for(&self, action: Action) -> &str {
        match action {
            Action::Enable => &self.enable_command,
            Action::Disable => &self.disable_command,
        }
    }

    /// Start the helper for `action` without waiting for it.
    ///
    /// Returns the child's pid.
    pub fn spawn(&self, action: Action) -> Result<u32, InterceptError> {
        let command = self.command_for(action);

        let mut child = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| InterceptError::Launch { action, source })?;

        let pid = child.id();
        tracing::info!(%action, command, pid, "Interception helper launched");

        let reaper = thread::Builder::new()
            .name(format!("intercept-{}", action))
            .spawn(move || match child.wait() {
                Ok(status) if status.success() => {
                    tracing::debug!(%action, pid, "Interception helper finished");
                }
                Ok(status) => {
                    tracing::warn!(%action, pid, %status, "Interception helper exited with failure");
                }
                Err(e) => {
                    tracing::warn!(%action, pid, error = %e, "Failed to wait for interception helper");
                }
            });
        if let Err(e) = reaper {
            // Helper still runs; it is reaped when this process exits
            tracing::warn!(%action, pid, error = %e, "Failed to start interception reaper thread");
        }

        Ok(pid)
    }

    fn launch(&self, action: Action) {
        match self.spawn(action) {
            Ok(_) => metrics::record_launch(action, true),
            Err(e) => {
                tracing::error!(error = %e, "Interception helper did not start");
                metrics::record_launch(action, false);
            }
        }
    }
}

impl Default for CommandInterceptor {
    fn default() -> Self {
        Self::new(DEFAULT_ENABLE_COMMAND, DEFAULT_DISABLE_COMMAND)
    }
}

impl Interceptor for CommandInterceptor {
    fn enable(&self) {
        self.launch(Action::Enable);
    }

    fn disable(&self) {
        self.launch(Action::Disable);
    }
}

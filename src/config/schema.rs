//! Proxy configuration schema.
//!
//! Mirrors the subset of the mesh proxy configuration this agent reads.
//! Keys are camelCase, matching what the injector writes into `PROXY_CONFIG`.

use serde::{Deserialize, Serialize};

/// Discovery address used when none is configured.
pub const DEFAULT_DISCOVERY_ADDRESS: &str = "istiod.istio-system.svc:15012";

/// Proxy-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProxyConfig {
    /// Control plane discovery address (host:port).
    pub discovery_address: String,

    /// Directory holding generated proxy configuration.
    pub config_path: String,

    /// Path to the proxy binary.
    pub binary_path: String,

    /// Service cluster reported by the proxy.
    pub service_cluster: String,

    /// Drain duration, as written by the injector (e.g. "45s").
    pub drain_duration: String,

    /// Parent shutdown duration (e.g. "60s").
    pub parent_shutdown_duration: String,

    /// Proxy admin port.
    pub proxy_admin_port: u16,

    /// Sidecar status port.
    pub status_port: u16,

    /// Authentication policy towards the control plane.
    pub control_plane_auth_policy: String,

    /// Maximum length of generated stat names.
    pub stat_name_length: u32,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            discovery_address: DEFAULT_DISCOVERY_ADDRESS.to_string(),
            config_path: "./etc/istio/proxy".to_string(),
            binary_path: "/usr/local/bin/envoy".to_string(),
            service_cluster: "istio-proxy".to_string(),
            drain_duration: "45s".to_string(),
            parent_shutdown_duration: "60s".to_string(),
            proxy_admin_port: 15000,
            status_port: 15020,
            control_plane_auth_policy: "MUTUAL_TLS".to_string(),
            stat_name_length: 189,
        }
    }
}

impl ProxyConfig {
    /// Resolve the configuration from the `PROXY_CONFIG` environment variable.
    pub fn from_env() -> Self {
        let raw = std::env::var(super::PROXY_CONFIG_ENV).ok();
        super::resolve_proxy_config(raw.as_deref())
    }
}

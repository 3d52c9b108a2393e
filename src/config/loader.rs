//! Configuration loading from the environment.

use thiserror::Error;

use crate::config::schema::{ProxyConfig, DEFAULT_DISCOVERY_ADDRESS};

/// Environment variable carrying the YAML proxy configuration.
pub const PROXY_CONFIG_ENV: &str = "PROXY_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not parse proxy config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Parse a YAML proxy configuration.
///
/// Fields missing from the document keep their default values.
pub fn load_proxy_config(raw: &str) -> Result<ProxyConfig, ConfigError> {
    let config: ProxyConfig = serde_yaml::from_str(raw)?;
    Ok(config)
}

/// Resolve the effective proxy configuration from an optional override.
///
/// Never fails: an absent or empty override keeps the defaults, a malformed one
/// is logged and ignored, and an empty discovery address falls back to
/// [`DEFAULT_DISCOVERY_ADDRESS`].
pub fn resolve_proxy_config(raw: Option<&str>) -> ProxyConfig {
    let mut config = match raw {
        Some(raw) if !raw.trim().is_empty() => match load_proxy_config(raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Ignoring {}, using default proxy config", PROXY_CONFIG_ENV);
                ProxyConfig::default()
            }
        },
        _ => ProxyConfig::default(),
    };

    if config.discovery_address.is_empty() {
        config.discovery_address = DEFAULT_DISCOVERY_ADDRESS.to_string();
    }

    config
}

/// Resolve only the control plane discovery address.
pub fn resolve_discovery_address(raw: Option<&str>) -> String {
    resolve_proxy_config(raw).discovery_address
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_override_uses_default() {
        assert_eq!(resolve_discovery_address(None), DEFAULT_DISCOVERY_ADDRESS);
        assert_eq!(resolve_discovery_address(Some("")), DEFAULT_DISCOVERY_ADDRESS);
    }

    #[test]
    fn test_malformed_override_falls_back() {
        let raw = "discoveryAddress: [unterminated";
        assert!(load_proxy_config(raw).is_err());
        assert_eq!(resolve_discovery_address(Some(raw)), DEFAULT_DISCOVERY_ADDRESS);
    }

    #[test]
    fn test_wrong_type_falls_back() {
        let raw = "proxyAdminPort: not-a-port\ndiscoveryAddress: cp.example:15012\n";
        assert_eq!(resolve_proxy_config(Some(raw)), ProxyConfig::default());
    }

    #[test]
    fn test_override_applied() {
        let raw = "discoveryAddress: istiod.mesh.svc:15012\nserviceCluster: reviews\nextraField: ignored\n";
        let config = resolve_proxy_config(Some(raw));
        assert_eq!(config.discovery_address, "istiod.mesh.svc:15012");
        assert_eq!(config.service_cluster, "reviews");
        // Untouched keys keep defaults
        assert_eq!(config.proxy_admin_port, 15000);
    }

    #[test]
    fn test_empty_discovery_address_falls_back() {
        let raw = "discoveryAddress: \"\"\nbinaryPath: /opt/envoy\n";
        let config = resolve_proxy_config(Some(raw));
        assert_eq!(config.discovery_address, DEFAULT_DISCOVERY_ADDRESS);
        assert_eq!(config.binary_path, "/opt/envoy");
    }
}

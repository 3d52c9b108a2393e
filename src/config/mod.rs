//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! PROXY_CONFIG env (YAML, optional)
//!     → loader.rs (parse & deserialize)
//!     → on parse failure: log, keep defaults
//!     → empty discovery address: fall back to the mesh default
//!     → ProxyConfig (resolved once, immutable)
//! ```
//!
//! # Design Decisions
//! - Resolution never fails; every error degrades to defaults
//! - All fields have defaults to allow minimal configs
//! - Unknown keys are ignored, the injected config carries far more than we model

pub mod loader;
pub mod schema;

pub use loader::{
    load_proxy_config, resolve_discovery_address, resolve_proxy_config, ConfigError,
    PROXY_CONFIG_ENV,
};
pub use schema::{ProxyConfig, DEFAULT_DISCOVERY_ADDRESS};

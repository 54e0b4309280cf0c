//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration shared by the API and gateway binaries.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Item API server settings.
    pub api: ApiConfig,

    /// Frontend gateway settings.
    pub gateway: GatewayConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Item API server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Maximum accepted request body in bytes.
    pub max_body_size: usize,

    /// Start with the Notebook/Pencil seed items.
    pub seed: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            max_body_size: 100 * 1024,
            seed: true,
        }
    }
}

/// Frontend gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Directory of static assets served for non-forwarded paths.
    pub static_dir: Option<String>,

    /// Relay settings. Absent means clients call the API directly.
    pub forward: Option<ForwardConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            static_dir: None,
            forward: None,
        }
    }
}

/// Where and what the gateway relays.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForwardConfig {
    /// Upstream authority (e.g., "127.0.0.1:3000" or "backend:3000").
    pub upstream: String,

    /// Requests under this prefix are relayed.
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,

    /// Drop the prefix from the forwarded path.
    #[serde(default)]
    pub strip_prefix: bool,
}

fn default_path_prefix() -> String {
    "/items".to_string()
}

impl ForwardConfig {
    pub fn new(upstream: impl Into<String>) -> Self {
        Self {
            upstream: upstream.into(),
            path_prefix: default_path_prefix(),
            strip_prefix: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

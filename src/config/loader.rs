//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, Component, ValidationError};

/// Environment variable that replaces the port of the starting binary's bind address.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid PORT value '{0}'")]
    InvalidPort(String),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration for `component`.
///
/// Reads the TOML file when a path is given (defaults otherwise), applies the
/// `PORT` override, then validates.
pub fn load_config(path: Option<&Path>, component: Component) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_config(&content)?
        }
        None => AppConfig::default(),
    };

    if let Ok(port) = std::env::var(PORT_ENV) {
        apply_port_override(&mut config, component, &port)?;
    }

    validate_config(&config, component).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Deserialize a TOML document. Missing sections fall back to defaults.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Replace the port of `component`'s bind address, keeping its host.
pub fn apply_port_override(
    config: &mut AppConfig,
    component: Component,
    port: &str,
) -> Result<(), ConfigError> {
    let port: u16 = port
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort(port.to_string()))?;

    let bind = match component {
        Component::Api => &mut config.api.bind_address,
        Component::Gateway => &mut config.gateway.bind_address,
    };
    let host = bind.rsplit_once(':').map_or(bind.as_str(), |(host, _)| host);
    *bind = format!("{host}:{port}");

    tracing::debug!(bind_address = %bind, "Applied {} override", PORT_ENV);
    Ok(())
}

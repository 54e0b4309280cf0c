//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Bind addresses parse as socket addresses
//! - Gateway has something to do and a usable upstream
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: (AppConfig, Component) → Result<(), Vec<ValidationError>>
//! - Only the sections the starting binary reads are checked

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::uri::Authority;

use crate::config::schema::AppConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// The binary a configuration is being loaded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Api,
    Gateway,
}

/// Check the sections `component` uses, collecting every problem found.
pub fn validate_config(config: &AppConfig, component: Component) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match component {
        Component::Api => validate_api(config, &mut errors),
        Component::Gateway => validate_gateway(config, &mut errors),
    }

    let obs = &config.observability;
    if !LOG_LEVELS.contains(&obs.log_level.to_lowercase().as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", obs.log_level),
        ));
    }
    if obs.metrics_enabled {
        check_bind(&mut errors, "observability.metrics_address", &obs.metrics_address);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_api(config: &AppConfig, errors: &mut Vec<ValidationError>) {
    check_bind(errors, "api.bind_address", &config.api.bind_address);
    if config.api.max_body_size == 0 {
        errors.push(ValidationError::new("api.max_body_size", "must be greater than zero"));
    }
}

fn validate_gateway(config: &AppConfig, errors: &mut Vec<ValidationError>) {
    let gateway = &config.gateway;
    check_bind(errors, "gateway.bind_address", &gateway.bind_address);
    if gateway.static_dir.is_none() && gateway.forward.is_none() {
        errors.push(ValidationError::new(
            "gateway",
            "set static_dir, [gateway.forward], or both",
        ));
    }
    if let Some(forward) = &gateway.forward {
        if Authority::from_str(&forward.upstream).is_err() || forward.upstream.contains('@') {
            errors.push(ValidationError::new(
                "gateway.forward.upstream",
                format!("'{}' is not a host:port authority", forward.upstream),
            ));
        }
        if !forward.path_prefix.starts_with('/') {
            errors.push(ValidationError::new(
                "gateway.forward.path_prefix",
                "must start with '/'",
            ));
        }
    }
}

fn check_bind(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            field,
            format!("'{value}' is not a socket address"),
        ));
    }
}

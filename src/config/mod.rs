//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), optional
//!     → loader.rs (parse & deserialize, PORT override)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → handed to the server being started
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Whether the frontend reaches the API directly or through the gateway
//!   is decided by the presence of `[gateway.forward]`, never guessed

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_port_override, load_config, ConfigError};
pub use validation::{validate_config, Component, ValidationError};
pub use schema::{ApiConfig, AppConfig, ForwardConfig, GatewayConfig, LogFormat, ObservabilityConfig};

//! In-memory item CRUD API with a forwarding gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!   browser / item-cli
//!        │
//!        ├──────────────▶ item-gateway ──(prefix /items)──┐
//!        │                 static assets                  │
//!        │                                                ▼
//!        └──────────────────────────────────────────▶ item-api
//!                                                     handlers → ItemStore
//! ```
//!
//! Whether clients reach `item-api` directly or through the gateway is a
//! deployment choice made in configuration.

// Core
pub mod api;
pub mod http;
pub mod store;

// Topology and clients
pub mod client;
pub mod gateway;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use gateway::GatewayServer;
pub use http::ApiServer;
pub use lifecycle::Shutdown;
pub use store::{Item, ItemStore};

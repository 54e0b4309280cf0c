//! Frontend gateway.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → forward.rs (path under the configured prefix?)
//!         yes → rewrite URI + Host → upstream item API → stream response back
//!         no  → static asset directory (if configured) → 404 otherwise
//! ```
//!
//! # Design Decisions
//! - One request, one upstream attempt: no retry, pooling policy, or timeout
//! - Nothing is transformed except the target URI and `Host`
//! - Unreachable upstream before any response is a 502 JSON error

pub mod forward;
pub mod server;

pub use forward::{Forwarder, PrefixMatcher};
pub use server::{build_gateway_router, GatewayError, GatewayServer};

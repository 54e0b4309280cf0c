//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and servers produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line via the trace span
//! - Metrics are cheap (atomic increments behind the `metrics` facade)
//! - Nothing here can fail a request

pub mod logging;
pub mod metrics;

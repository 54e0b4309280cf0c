//! HTTP layer of the item API.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned, trace span opened)
//!     → api::handlers (validate, simulate, touch the store)
//!     → response.rs (JSON body or ApiError mapping)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::{ApiError, ErrorBody, ItemList, ItemMessage};
pub use server::{build_router, ApiServer, AppState};

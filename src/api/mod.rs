//! Item CRUD API.
//!
//! # Data Flow
//! ```text
//! GET    /items        → simulate.rs lookup → (canned error | store.list)
//! POST   /items        → payload.rs validate → store.create → 201
//! PUT    /items/{id}   → store.find → payload.rs validate → store.update → 200
//! DELETE /items/{id}   → store.delete → 200
//! ```
//!
//! # Design Decisions
//! - Handlers hold no state of their own; the store is injected via `State`
//! - Bodies are validated before any mutation
//! - A non-numeric id is "not found", never a 400

pub mod handlers;
pub mod payload;
pub mod simulate;

pub use payload::{parse_item_id, ItemPayload, ValidationError};
pub use simulate::SimulatedFailure;

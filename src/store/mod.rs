//! In-memory item storage.
//!
//! # Data Flow
//! ```text
//! api handlers
//!     → ItemStore (Arc-shared, one mutex per operation)
//!     → Vec<Item> in insertion order + next-id counter
//! ```
//!
//! # Design Decisions
//! - Nothing is persisted; the store lives and dies with the process
//! - Ids come from a counter that only moves forward, so deleted ids never return
//! - The store does not validate; the API layer rejects bad payloads first

pub mod item;
pub mod memory;

pub use item::{Item, ItemId};
pub use memory::ItemStore;

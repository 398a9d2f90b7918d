//! Store abstraction
//!
//! The catalog engine never talks to a persistence engine directly; it goes
//! through the narrow [`EntityStore`] contract (find by id, list, insert,
//! replace, remove, count, exists). [`MemTable`] is the in-process
//! implementation: one write-lock section per mutating operation is the
//! atomicity boundary, and every read hands out fresh copies, so no entity
//! state survives a request.

mod error;
mod memory;
mod traits;

pub use error::{StoreError, StoreOperation};
pub use memory::MemTable;
pub use traits::{EntityStore, Keyed, StoreResult};

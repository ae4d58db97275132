//! Remote store boundary
//!
//! The authoritative source of list items:
//! - `file`: a JSON file (CLI default)
//! - `memory`: process memory, with injectable failures

mod factory;
mod file;
mod memory;
mod records;
mod store;

pub use factory::{create_store, StoreKind};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use records::{Record, Records};
pub use store::RemoteStore;

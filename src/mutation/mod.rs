//! Mutations and the cache patches that follow them

pub mod executor;
pub mod patch;

pub use executor::{DeleteOutcome, MutationExecutor};
pub use patch::{append_page, apply_delete_patch, PatchResult};

//! Domain logic: turn a set of decoded patches plus an optional ordering override
//! into one deterministic runtime profile.
//!
//! This crate owns *what* a profile is made of and in which order. It does not own
//! *where* patches come from; that's the `patchfold-core` crate.

mod compositor;
mod error;
mod filter;
mod order_store;
mod patch_set;
pub mod ports;

pub use compositor::{compose, compose_with};
pub use error::{CompositionError, ReorderError};
pub use filter::{Whitelist, filter_libraries, filter_patch};
pub use order_store::{AbsentReason, OrderLoad, OrderStore};
pub use patch_set::{PatchSet, move_patch};
pub use ports::{Diagnostics, Level, Storage};

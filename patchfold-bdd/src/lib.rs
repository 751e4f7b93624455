//! BDD harness (cucumber-rs).
//!
//! Scenarios live under `features/` and drive the `patchfold` binary against
//! throwaway profile directories. This crate keeps them isolated from the
//! production crates.

/// File name of the persisted order inside a profile directory.
pub const ORDER_FILE: &str = "patches.order";

/// Split a comma separated identifier list from a step argument.
pub fn split_ids(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

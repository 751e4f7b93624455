//! Library half of the `patchfold` CLI.
//!
//! Exposes config discovery and merging so harnesses can build the same
//! settings the binary does.

pub mod config;

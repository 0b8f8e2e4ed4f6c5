//! Typed manifest actions.
//!
//! Every non-`set` line of a manifest is one action: a directory to create,
//! a file to install, a dependency to honor, and so on. Each action kind has
//! a fixed rank that defines the canonical order of a manifest, a set of
//! mandatory attributes validated at construction, and a line keyword used
//! for parsing and rendering.

pub mod depend;
mod types;

pub use types::*;

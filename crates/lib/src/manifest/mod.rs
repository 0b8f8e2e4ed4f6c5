//! Manifest container, parsing, and diffing.
//!
//! A manifest is the representation of the actions composing a specific
//! package version, on both the client and the repository; both use the same
//! line-oriented text form as the entire persisted representation.

pub mod diff;
mod types;

pub use types::*;

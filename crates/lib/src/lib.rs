//! parcel-lib: Package manifest model
//!
//! This crate provides the fundamental types of the parcel manifest format:
//! - `Action`: one unit of package content or metadata (file, dir, depend, ...)
//! - `Manifest`: the full set of attributes and actions for one package version
//! - `ContentSource`: a deferred reference to payload bytes, resolved on demand
//!
//! The manifest text format is line-oriented: `set` lines carry package
//! attributes, every other line is a typed action. Parsing keeps actions in a
//! canonical order so that serialization is byte-stable and two manifests can
//! be diffed by their rendered content.

pub mod action;
pub mod error;
pub mod fmri;
pub mod manifest;
pub mod retrieve;

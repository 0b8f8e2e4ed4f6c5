//! Command implementations.

pub mod diff;
pub mod show;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use parcel_lib::manifest::Manifest;

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
  let text = fs::read_to_string(path).with_context(|| format!("Failed to read manifest: {}", path.display()))?;

  let mut manifest = Manifest::new();
  manifest
    .add_content(&text)
    .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;
  Ok(manifest)
}

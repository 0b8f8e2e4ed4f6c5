//! Show command implementation.
//!
//! Parses a manifest and reprints it in canonical form: fmri first, sorted
//! attributes, then actions in rank order.

use std::path::Path;

use anyhow::Result;

use crate::cmd::load_manifest;
use crate::output::{OutputFormat, print_json};

pub fn cmd_show(path: &Path, format: OutputFormat) -> Result<()> {
  let manifest = load_manifest(path)?;

  if format.is_json() {
    print_json(&manifest)?;
  } else {
    print!("{}", manifest);
  }

  Ok(())
}

//! Diff command implementation.
//!
//! Compares two manifests and displays their symmetric difference as
//! `+`/`-` prefixed canonical lines. With no older manifest, the newer one
//! is compared against the empty baseline, so everything shows as added.

use std::path::Path;

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};

use parcel_lib::manifest::Manifest;
use parcel_lib::manifest::diff::{Change, ManifestDiff, compute_diff};

use crate::cmd::load_manifest;
use crate::output::{OutputFormat, print_json, symbols};

pub fn cmd_diff(newer: &Path, older: Option<&Path>, format: OutputFormat) -> Result<()> {
  let newer_manifest = load_manifest(newer)?;
  let older_manifest = match older {
    Some(path) => load_manifest(path)?,
    None => Manifest::null(),
  };

  let diff = compute_diff(&newer_manifest, &older_manifest);

  if format.is_json() {
    print_json(&diff)?;
  } else {
    print_human_diff(&diff);
  }

  Ok(())
}

fn print_human_diff(diff: &ManifestDiff) {
  if diff.is_empty() {
    println!("No differences.");
    return;
  }

  for entry in &diff.entries {
    match entry.change {
      Change::Added => println!(
        "{} {}",
        symbols::PLUS.if_supports_color(Stream::Stdout, |s| s.green()),
        entry.line
      ),
      Change::Removed => println!(
        "{} {}",
        symbols::MINUS.if_supports_color(Stream::Stdout, |s| s.red()),
        entry.line
      ),
    }
  }
}

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::action::Action;
use crate::error::ManifestError;
use crate::fmri::Fmri;
use crate::retrieve::ContentSource;

/// The complete description of one package version.
///
/// A manifest owns an optional package reference, a package-attribute map,
/// and an ordered sequence of actions. The sequence is kept sorted by kind
/// rank as each line is ingested, and actions are never removed: consumers
/// (installer, differ, publisher) read a frozen manifest.
///
/// # Reserved attributes
///
/// The framework reserves the unprefixed attribute names `base_directory`,
/// `fmri`, `isa`, `licenses`, `platform`, and `relocatable`. Third parties
/// prefix their attributes with a reversed domain name, e.g.
/// `com.example,supported`. This is a convention; the core stores any name.
///
/// # Lifecycle
///
/// Constructed empty, optionally given an fmri, populated incrementally via
/// [`add_content`](Manifest::add_content), then read-only. [`Manifest::null`]
/// is the "nothing installed" baseline: diffing a manifest against it yields
/// the manifest's complete contents as additions, so every install can be
/// viewed as a transition between two manifests.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
  /// The package and version this manifest describes.
  pub fmri: Option<Fmri>,
  /// Package-level attributes, set via `set` lines.
  pub attrs: BTreeMap<String, String>,
  /// Actions sorted by kind rank; arrival order within a rank.
  actions: Vec<Action>,
}

impl Manifest {
  /// Create a new empty manifest.
  pub fn new() -> Self {
    Self::default()
  }

  /// The null manifest: no fmri, no attributes, no actions.
  ///
  /// Used as the baseline for "nothing installed" comparisons. A fresh
  /// value each call; there is no shared mutable singleton.
  pub fn null() -> Self {
    Self::default()
  }

  /// Set the package reference this manifest describes.
  pub fn set_fmri(&mut self, fmri: Fmri) {
    self.fmri = Some(fmri);
  }

  /// The actions in canonical order.
  pub fn actions(&self) -> &[Action] {
    &self.actions
  }

  /// Insert an action, keeping the sequence sorted by kind rank.
  ///
  /// Binary insertion after the last element of equal rank, so actions of
  /// the same kind stay in arrival order. The first action into an empty
  /// sequence skips the search.
  pub fn insert(&mut self, action: Action) {
    if self.actions.is_empty() {
      self.actions.push(action);
      return;
    }
    let at = self.actions.partition_point(|a| a.rank() <= action.rank());
    self.actions.insert(at, action);
  }

  /// Ingest manifest text, one line at a time.
  ///
  /// Blank lines and `#` comments are skipped. `set` lines write into the
  /// attribute map (or set the fmri for the reserved `fmri` name); every
  /// other line is dispatched to the action parser and inserted in order.
  /// Payload-carrying actions are bound to a [`ContentSource`] capturing the
  /// manifest's current fmri and the action's digest, deferring all I/O to
  /// the retrieval collaborator.
  ///
  /// Parsing is all-or-nothing per call: the first malformed line aborts
  /// ingestion and its error is returned.
  pub fn add_content(&mut self, text: &str) -> Result<(), ManifestError> {
    for line in text.lines() {
      let trimmed = line.trim();
      if trimmed.is_empty() || trimmed.starts_with('#') {
        continue;
      }

      let keyword = trimmed.split_whitespace().next().unwrap_or(trimmed);
      if keyword == "set" {
        self.apply_set(&trimmed[3..], trimmed)?;
        continue;
      }

      let mut action = Action::from_line(trimmed)?;
      if action.kind.carries_payload() {
        if let Some(digest) = action.attrs.get("hash") {
          action.source = Some(ContentSource::new(self.fmri.clone(), digest.clone()));
        }
      }
      trace!(%action, "parsed action");
      self.insert(action);
    }

    debug!(
      actions = self.actions.len(),
      attrs = self.attrs.len(),
      "manifest content ingested"
    );
    Ok(())
  }

  /// Apply a `set` pseudo-action.
  ///
  /// Accepts both `set name=value` and `set name = value`; the name and
  /// value are split on the first `=` and trimmed, so the serialized spaced
  /// form parses back to the same attribute.
  fn apply_set(&mut self, rest: &str, line: &str) -> Result<(), ManifestError> {
    let (name, value) = rest
      .split_once('=')
      .ok_or_else(|| ManifestError::InvalidActionLine { line: line.to_string() })?;
    let name = name.trim();
    let value = value.trim();
    if name.is_empty() {
      return Err(ManifestError::InvalidActionLine { line: line.to_string() });
    }

    if name == "fmri" {
      self.fmri = Some(Fmri::new(value));
    } else {
      self.attrs.insert(name.to_string(), value.to_string());
    }
    Ok(())
  }
}

impl fmt::Display for Manifest {
  /// Render the canonical text form.
  ///
  /// The fmri `set` line first, then package attributes in sorted key
  /// order, then the actions in stored order. This exact ordering makes the
  /// output reproducible, which diffing and byte-stable storage rely on.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(fmri) = &self.fmri {
      writeln!(f, "set fmri = {}", fmri)?;
    }
    for (name, value) in &self.attrs {
      writeln!(f, "set {} = {}", name, value)?;
    }
    for action in &self.actions {
      writeln!(f, "{}", action)?;
    }
    Ok(())
  }
}

//! Diff computation between manifests.
//!
//! Two manifests are compared by their canonical rendered content: every
//! action and every package attribute is projected to a string, and the
//! symmetric difference of the two string sets is reported. Equality is
//! defined purely by rendered content, which is why the render must be
//! canonical (sorted attribute tails, deterministic serialization).
//!
//! Diffing against [`Manifest::null`] yields everything as additions; this
//! is the basis for "install everything" semantics.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::manifest::Manifest;

/// Whether a line was added or removed relative to the older manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Change {
  Added,
  Removed,
}

impl Change {
  /// The display prefix: `+` for additions, `-` for removals.
  pub fn prefix(self) -> &'static str {
    match self {
      Change::Added => "+",
      Change::Removed => "-",
    }
  }
}

/// One differing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
  pub change: Change,
  pub line: String,
}

/// The symmetric difference between two manifests' canonical content.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestDiff {
  /// Differing lines, sorted by line text for deterministic output.
  pub entries: Vec<DiffEntry>,
}

impl ManifestDiff {
  /// Returns true if the two manifests rendered identically.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Lines present only in the newer manifest.
  pub fn added(&self) -> impl Iterator<Item = &str> {
    self
      .entries
      .iter()
      .filter(|e| e.change == Change::Added)
      .map(|e| e.line.as_str())
  }

  /// Lines present only in the older manifest.
  pub fn removed(&self) -> impl Iterator<Item = &str> {
    self
      .entries
      .iter()
      .filter(|e| e.change == Change::Removed)
      .map(|e| e.line.as_str())
  }
}

/// Compute the difference between two manifests.
///
/// `newer` is the manifest being installed or published; `older` is what is
/// already present (possibly the null manifest). Lines in `newer`'s rendered
/// set only are additions, lines in `older`'s only are removals. Two
/// structurally different objects that render identically are
/// indistinguishable here by design.
pub fn compute_diff(newer: &Manifest, older: &Manifest) -> ManifestDiff {
  let newer_set = rendered_set(newer);
  let older_set = rendered_set(older);

  let mut entries = Vec::new();
  for line in newer_set.difference(&older_set) {
    entries.push(DiffEntry {
      change: Change::Added,
      line: line.clone(),
    });
  }
  for line in older_set.difference(&newer_set) {
    entries.push(DiffEntry {
      change: Change::Removed,
      line: line.clone(),
    });
  }
  entries.sort_by(|a, b| a.line.cmp(&b.line).then(a.change.cmp(&b.change)));

  ManifestDiff { entries }
}

/// Project a manifest's actions and attributes into canonical strings.
///
/// Actions use their rendered line form; attributes use `name=value`. The
/// fmri is not part of the attribute map and does not participate.
fn rendered_set(manifest: &Manifest) -> BTreeSet<String> {
  let mut set: BTreeSet<String> = manifest.actions().iter().map(ToString::to_string).collect();
  for (name, value) in &manifest.attrs {
    set.insert(format!("{}={}", name, value));
  }
  set
}

#[cfg(test)]
mod tests {
  use super::*;

  fn manifest(text: &str) -> Manifest {
    let mut m = Manifest::new();
    m.add_content(text).unwrap();
    m
  }

  #[test]
  fn identical_manifests_have_empty_diff() {
    let a = manifest("set com.sun,test=true\nfile aaa mode=0555 owner=root group=bin path=/x\n");
    let b = manifest("set com.sun,test=true\nfile aaa mode=0555 owner=root group=bin path=/x\n");

    let diff = compute_diff(&a, &b);
    assert!(diff.is_empty());
  }

  #[test]
  fn diff_is_symmetric_with_roles_swapped() {
    let a = manifest("file aaa mode=0555 owner=root group=bin path=/x\nset one=1\n");
    let b = manifest("file bbb mode=0555 owner=root group=bin path=/x\nset two=2\n");

    let forward = compute_diff(&a, &b);
    let backward = compute_diff(&b, &a);

    let forward_added: BTreeSet<&str> = forward.added().collect();
    let backward_removed: BTreeSet<&str> = backward.removed().collect();
    assert_eq!(forward_added, backward_removed);

    let forward_removed: BTreeSet<&str> = forward.removed().collect();
    let backward_added: BTreeSet<&str> = backward.added().collect();
    assert_eq!(forward_removed, backward_added);
  }

  #[test]
  fn diff_against_null_reports_everything_as_added() {
    let m = manifest(
      "set fmri=pkg:/tool@1.0\n\
       set com.sun,test=true\n\
       dir mode=0755 owner=root group=bin path=/usr\n\
       require pkg:/library/libc\n",
    );

    let diff = compute_diff(&m, &Manifest::null());
    assert_eq!(diff.removed().count(), 0);

    let added: BTreeSet<&str> = diff.added().collect();
    let expected: BTreeSet<&str> = [
      "com.sun,test=true",
      "dir group=bin mode=0755 owner=root path=/usr",
      "require pkg:/library/libc",
    ]
    .into_iter()
    .collect();
    assert_eq!(added, expected);
  }

  #[test]
  fn upgrade_reports_exactly_the_changed_and_added_lines() {
    // The older version installs one file; the newer version changes that
    // file's digest and ships one more file.
    let older = manifest(
      "set com.sun,test=true\n\
       # require pkg:/library/libc\n\
       file fff555fff mode=0555 owner=sch group=staff path=/usr/bin/i386/sort isa=i386\n",
    );
    let newer = manifest(
      "set com.sun,test=true\n\
       # require pkg:/library/libc\n\
       file fff555ff9 mode=0555 owner=sch group=staff path=/usr/bin/i386/sort isa=i386\n\
       file eeeaaaeee mode=0555 owner=sch group=staff path=/usr/bin/amd64/sort isa=amd64\n",
    );

    let diff = compute_diff(&newer, &older);
    assert_eq!(
      diff.entries,
      vec![
        DiffEntry {
          change: Change::Added,
          line: "file eeeaaaeee group=staff isa=amd64 mode=0555 owner=sch path=/usr/bin/amd64/sort".to_string(),
        },
        DiffEntry {
          change: Change::Added,
          line: "file fff555ff9 group=staff isa=i386 mode=0555 owner=sch path=/usr/bin/i386/sort".to_string(),
        },
        DiffEntry {
          change: Change::Removed,
          line: "file fff555fff group=staff isa=i386 mode=0555 owner=sch path=/usr/bin/i386/sort".to_string(),
        },
      ]
    );
  }

  #[test]
  fn attribute_only_difference_is_reported() {
    let older = manifest("set com.sun,test=true\n");
    let newer = manifest("set com.sun,test=true\nset com.sun,data=true\n");

    let diff = compute_diff(&newer, &older);
    assert_eq!(
      diff.entries,
      vec![DiffEntry {
        change: Change::Added,
        line: "com.sun,data=true".to_string(),
      }]
    );
  }

  #[test]
  fn fmri_does_not_participate_in_the_diff() {
    let a = manifest("set fmri=pkg:/tool@1.0\n");
    let b = manifest("set fmri=pkg:/tool@2.0\n");

    let diff = compute_diff(&a, &b);
    assert!(diff.is_empty());
  }

  #[test]
  fn diff_serializes_to_json() {
    let diff = compute_diff(&manifest("set a=1\n"), &Manifest::null());
    let json = serde_json::to_string(&diff).unwrap();
    assert!(json.contains("\"added\""));
  }
}

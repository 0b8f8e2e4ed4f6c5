//! Package version references.

use serde::{Deserialize, Serialize};

/// An opaque reference to a package name and version.
///
/// The manifest core treats FMRIs as value types with no internal structure
/// beyond their string form: they are stored, compared, and printed, never
/// interpreted. Resolution against a catalog happens elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fmri(String);

impl Fmri {
  pub fn new(s: impl Into<String>) -> Self {
    Self(s.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::fmt::Display for Fmri {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<&str> for Fmri {
  fn from(s: &str) -> Self {
    Self(s.to_string())
  }
}

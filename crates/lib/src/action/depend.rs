//! Dependency action line parsing.
//!
//! A dependency line is one of
//!
//! ```text
//! require <fmri> [name=value ...]
//! optional <fmri> [name=value ...]
//! incorporate <fmri> [name=value ...]
//! ```
//!
//! The keyword is validated against the dependency type table before the
//! target is read, so an unrecognized keyword and a malformed line surface
//! as distinct errors.

use std::collections::BTreeMap;

use crate::action::{Action, ActionKind, DependencyType};
use crate::error::ManifestError;

/// Parse one dependency action line.
///
/// The token after the keyword is captured as the target `fmri`. Any
/// trailing tokens are `name=value` settings; each is split on the first
/// `=` only, so values may themselves contain `=`.
pub fn parse_depend_line(line: &str) -> Result<Action, ManifestError> {
  let line = line.trim();
  let mut tokens = line.split_whitespace();

  let keyword = tokens
    .next()
    .ok_or_else(|| ManifestError::InvalidDependencyLine { line: line.to_string() })?;
  let dtype = DependencyType::from_keyword(keyword).ok_or_else(|| ManifestError::UnknownDependencyType {
    keyword: keyword.to_string(),
  })?;

  let fmri = tokens
    .next()
    .ok_or_else(|| ManifestError::InvalidDependencyLine { line: line.to_string() })?;

  let mut attrs = BTreeMap::new();
  attrs.insert("dtype".to_string(), dtype.keyword().to_string());
  attrs.insert("fmri".to_string(), fmri.to_string());

  for token in tokens {
    let (name, value) = token
      .split_once('=')
      .ok_or_else(|| ManifestError::InvalidDependencyLine { line: line.to_string() })?;
    attrs.insert(name.to_string(), value.to_string());
  }

  Action::new(ActionKind::Dependency, attrs)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn require_with_bare_fmri() {
    let action = parse_depend_line("require pkg:/library/libc").unwrap();

    assert_eq!(action.kind, ActionKind::Dependency);
    assert_eq!(action.dtype(), Some(DependencyType::Require));
    assert_eq!(action.attrs.get("fmri").unwrap(), "pkg:/library/libc");
    // dtype + fmri only, no extra attributes
    assert_eq!(action.attrs.len(), 2);
  }

  #[test]
  fn optional_with_trailing_settings() {
    let action = parse_depend_line("optional pkg:/foo bar=baz").unwrap();

    assert_eq!(action.dtype(), Some(DependencyType::Optional));
    assert_eq!(action.attrs.get("fmri").unwrap(), "pkg:/foo");
    assert_eq!(action.attrs.get("bar").unwrap(), "baz");
  }

  #[test]
  fn incorporate_parses() {
    let action = parse_depend_line("incorporate pkg:/entire@1.0").unwrap();
    assert_eq!(action.dtype(), Some(DependencyType::Incorporate));
  }

  #[test]
  fn value_splits_on_first_equals_only() {
    let action = parse_depend_line("require pkg:/a note=a=b").unwrap();
    assert_eq!(action.attrs.get("note").unwrap(), "a=b");
  }

  #[test]
  fn empty_value_is_accepted() {
    let action = parse_depend_line("require pkg:/a flag=").unwrap();
    assert_eq!(action.attrs.get("flag").unwrap(), "");
  }

  #[test]
  fn missing_target_is_invalid() {
    let err = parse_depend_line("require").unwrap_err();
    assert!(matches!(err, ManifestError::InvalidDependencyLine { .. }));
  }

  #[test]
  fn bare_trailing_token_is_invalid() {
    let err = parse_depend_line("require pkg:/a noequals").unwrap_err();
    assert!(matches!(err, ManifestError::InvalidDependencyLine { .. }));
  }

  #[test]
  fn unknown_keyword_is_distinguished_from_bad_grammar() {
    let err = parse_depend_line("exclude pkg:/a").unwrap_err();
    assert!(matches!(
      err,
      ManifestError::UnknownDependencyType { keyword } if keyword == "exclude"
    ));
  }

  #[test]
  fn depend_render_uses_dtype_keyword() {
    let action = parse_depend_line("optional pkg:/foo bar=baz").unwrap();
    assert_eq!(action.to_string(), "optional pkg:/foo bar=baz");
  }
}

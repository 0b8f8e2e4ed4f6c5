//! Error types for manifest parsing.

use thiserror::Error;

use crate::action::ActionKind;

/// Errors that can occur while parsing manifest text.
///
/// Ingestion is all-or-nothing per call: the first failure aborts the parse
/// and is surfaced to the caller, which owns the skip/abort/report policy.
#[derive(Debug, Error)]
pub enum ManifestError {
  /// A line's leading keyword has no registered action constructor.
  #[error("unknown action type '{keyword}'")]
  UnknownActionType { keyword: String },

  /// An action line is syntactically malformed (e.g. a bare token where a
  /// `name=value` pair was expected).
  #[error("invalid action line '{line}'")]
  InvalidActionLine { line: String },

  /// A dependency line does not match the `<dtype> <fmri> [name=value ...]`
  /// grammar.
  #[error("invalid dependency action '{line}'")]
  InvalidDependencyLine { line: String },

  /// A dependency line's keyword does not map to a known dependency type.
  #[error("unknown dependency type '{keyword}'")]
  UnknownDependencyType { keyword: String },

  /// An action is missing an attribute that its kind requires.
  #[error("{kind} action missing mandatory attribute '{name}'")]
  MissingMandatoryAttribute { kind: ActionKind, name: String },
}

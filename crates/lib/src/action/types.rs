use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;
use crate::retrieve::ContentSource;

/// The kind of a manifest action.
///
/// Each kind carries an integer rank used only for ordering actions within a
/// manifest. Ranks are sparse so new kinds can slot in without renumbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
  Directory,
  File,
  Link,
  Hardlink,
  Device,
  User,
  Group,
  Service,
  Restart,
  Dependency,
  Unknown,
}

impl ActionKind {
  /// The ordering rank for this kind.
  pub fn rank(self) -> u32 {
    match self {
      ActionKind::Directory => 10,
      ActionKind::File => 20,
      ActionKind::Link => 50,
      ActionKind::Hardlink => 55,
      ActionKind::Device => 100,
      ActionKind::User => 200,
      ActionKind::Group => 210,
      ActionKind::Service => 300,
      ActionKind::Restart => 310,
      ActionKind::Dependency => 400,
      ActionKind::Unknown => 500,
    }
  }

  /// The leading line keyword for this kind.
  ///
  /// Dependency lines are the exception: they start with their dependency
  /// type keyword (`require`, `optional`, `incorporate`) instead of a kind
  /// keyword, so `Dependency` never appears as a leading token.
  pub fn keyword(self) -> &'static str {
    match self {
      ActionKind::Directory => "dir",
      ActionKind::File => "file",
      ActionKind::Link => "link",
      ActionKind::Hardlink => "hardlink",
      ActionKind::Device => "device",
      ActionKind::User => "user",
      ActionKind::Group => "group",
      ActionKind::Service => "service",
      ActionKind::Restart => "restart",
      ActionKind::Dependency => "depend",
      ActionKind::Unknown => "unknown",
    }
  }

  /// Look up the kind registered for a line keyword.
  pub fn from_keyword(keyword: &str) -> Option<Self> {
    match keyword {
      "dir" => Some(ActionKind::Directory),
      "file" => Some(ActionKind::File),
      "link" => Some(ActionKind::Link),
      "hardlink" => Some(ActionKind::Hardlink),
      "device" => Some(ActionKind::Device),
      "user" => Some(ActionKind::User),
      "group" => Some(ActionKind::Group),
      "service" => Some(ActionKind::Service),
      "restart" => Some(ActionKind::Restart),
      "unknown" => Some(ActionKind::Unknown),
      _ => None,
    }
  }

  /// Attribute names that must be present for this kind.
  pub fn mandatory_attrs(self) -> &'static [&'static str] {
    match self {
      ActionKind::Directory => &["path"],
      ActionKind::File => &["hash", "path"],
      ActionKind::Link | ActionKind::Hardlink => &["path", "target"],
      ActionKind::Device => &["path"],
      ActionKind::User | ActionKind::Group => &["name"],
      ActionKind::Service | ActionKind::Restart => &["name"],
      ActionKind::Dependency => &["fmri", "dtype"],
      ActionKind::Unknown => &["path"],
    }
  }

  /// Whether lines of this kind carry a payload digest as their first
  /// positional token.
  pub fn carries_payload(self) -> bool {
    matches!(self, ActionKind::File)
  }
}

impl fmt::Display for ActionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.keyword())
  }
}

/// The kind of a dependency constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
  Require,
  Optional,
  Incorporate,
}

impl DependencyType {
  pub fn keyword(self) -> &'static str {
    match self {
      DependencyType::Require => "require",
      DependencyType::Optional => "optional",
      DependencyType::Incorporate => "incorporate",
    }
  }

  pub fn from_keyword(keyword: &str) -> Option<Self> {
    match keyword {
      "require" => Some(DependencyType::Require),
      "optional" => Some(DependencyType::Optional),
      "incorporate" => Some(DependencyType::Incorporate),
      _ => None,
    }
  }
}

impl fmt::Display for DependencyType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.keyword())
  }
}

/// One unit of package content or metadata.
///
/// Attributes live in a `BTreeMap` so the rendered `name=value` tail always
/// iterates in sorted key order; the differ depends on the render being
/// canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
  pub kind: ActionKind,
  pub attrs: BTreeMap<String, String>,
  /// Deferred payload reference, bound by the owning manifest for
  /// payload-carrying kinds.
  pub source: Option<ContentSource>,
}

impl Action {
  /// Construct an action, validating the kind's mandatory attributes.
  pub fn new(kind: ActionKind, attrs: BTreeMap<String, String>) -> Result<Self, ManifestError> {
    for name in kind.mandatory_attrs() {
      if !attrs.contains_key(*name) {
        return Err(ManifestError::MissingMandatoryAttribute {
          kind,
          name: (*name).to_string(),
        });
      }
    }
    Ok(Self {
      kind,
      attrs,
      source: None,
    })
  }

  /// Parse a single manifest action line.
  ///
  /// The line is dispatched on its leading keyword: dependency type keywords
  /// route to the dependency sub-parser, registered kind keywords to the
  /// generic constructor. An unregistered keyword is an error.
  pub fn from_line(line: &str) -> Result<Self, ManifestError> {
    let line = line.trim();
    let keyword = line
      .split_whitespace()
      .next()
      .ok_or_else(|| ManifestError::InvalidActionLine { line: line.to_string() })?;

    if DependencyType::from_keyword(keyword).is_some() {
      return super::depend::parse_depend_line(line);
    }

    let kind = ActionKind::from_keyword(keyword).ok_or_else(|| ManifestError::UnknownActionType {
      keyword: keyword.to_string(),
    })?;

    let mut attrs = BTreeMap::new();
    let mut tokens = line.split_whitespace().skip(1).peekable();

    // Payload kinds take the content digest as their first positional token.
    if kind.carries_payload() {
      if let Some(digest) = tokens.next_if(|t| !t.contains('=')) {
        attrs.insert("hash".to_string(), digest.to_string());
      }
    }

    for token in tokens {
      let (name, value) = token
        .split_once('=')
        .ok_or_else(|| ManifestError::InvalidActionLine { line: line.to_string() })?;
      attrs.insert(name.to_string(), value.to_string());
    }

    Action::new(kind, attrs)
  }

  /// The ordering rank of this action's kind.
  pub fn rank(&self) -> u32 {
    self.kind.rank()
  }

  /// The dependency type, for dependency actions.
  pub fn dtype(&self) -> Option<DependencyType> {
    self
      .attrs
      .get("dtype")
      .and_then(|kw| DependencyType::from_keyword(kw))
  }

  /// Attribute names rendered positionally, excluded from the `name=value`
  /// tail.
  fn positional_attrs(&self) -> &'static [&'static str] {
    match self.kind {
      ActionKind::Dependency => &["dtype", "fmri"],
      _ if self.kind.carries_payload() => &["hash"],
      _ => &[],
    }
  }
}

impl fmt::Display for Action {
  /// Render the canonical line form.
  ///
  /// `<keyword> [<positional tokens>] name=value ...` with the tail in
  /// sorted key order and positionally-rendered mandatory keys excluded.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      ActionKind::Dependency => {
        let dtype = self.attrs.get("dtype").map(String::as_str).unwrap_or_default();
        let fmri = self.attrs.get("fmri").map(String::as_str).unwrap_or_default();
        write!(f, "{} {}", dtype, fmri)?;
      }
      kind => {
        write!(f, "{}", kind.keyword())?;
        if kind.carries_payload() {
          if let Some(digest) = self.attrs.get("hash") {
            write!(f, " {}", digest)?;
          }
        }
      }
    }

    let positional = self.positional_attrs();
    for (name, value) in &self.attrs {
      if positional.contains(&name.as_str()) {
        continue;
      }
      write!(f, " {}={}", name, value)?;
    }
    Ok(())
  }
}

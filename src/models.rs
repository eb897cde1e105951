//! Data structures produced while scanning a task and expanding its bundles.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Deserialize;

/// The two file lists an asset bundle can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
  /// Stylesheets.
  Css,
  /// Scripts.
  Js,
}

impl AssetKind {
  /// Both kinds in manifest order.
  pub const ALL: [AssetKind; 2] = [AssetKind::Css, AssetKind::Js];

  /// Property name used in bundle declarations and manifest file names.
  pub fn as_str(self) -> &'static str {
    match self {
      AssetKind::Css => "css",
      AssetKind::Js => "js",
    }
  }
}

/// Asset bundle declaration as supplied by a bundle registry.
///
/// Lists that a bundle does not declare are empty rather than absent.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
  /// Fully-qualified bundle name, filled in from the registry key.
  #[serde(skip)]
  pub name: String,
  /// Directory holding the bundle's source files; preferred over `base_path`.
  #[serde(default)]
  pub source_path: Option<String>,
  /// Published directory of the bundle, used when `source_path` is unset.
  #[serde(default)]
  pub base_path: Option<String>,
  /// Stylesheets relative to the bundle directory, in declaration order.
  #[serde(default)]
  pub css: Vec<String>,
  /// Scripts relative to the bundle directory, in declaration order.
  #[serde(default)]
  pub js: Vec<String>,
}

impl Bundle {
  /// Directory the bundle's files live in, before alias resolution.
  pub fn effective_dir(&self) -> Option<&str> {
    self.source_path.as_deref().or(self.base_path.as_deref())
  }

  /// Declared file list for the requested kind.
  pub fn files(&self, kind: AssetKind) -> &[String] {
    match kind {
      AssetKind::Css => &self.css,
      AssetKind::Js => &self.js,
    }
  }
}

/// Ordered, de-duplicated collection of bundle references discovered for a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleSet {
  seen: BTreeSet<String>,
  names: Vec<String>,
}

impl BundleSet {
  /// Create an empty set.
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a bundle name; returns `false` when it was already present.
  pub fn insert(&mut self, name: impl Into<String>) -> bool {
    let name = name.into();
    if self.seen.insert(name.clone()) {
      self.names.push(name);
      true
    } else {
      false
    }
  }

  /// Drop every name that appears verbatim in the exclude list.
  pub fn remove_excluded(&mut self, exclude: &[String]) {
    if exclude.is_empty() {
      return;
    }
    self.names.retain(|name| !exclude.contains(name));
    self.seen.retain(|name| !exclude.contains(name));
  }

  /// Names in discovery order.
  pub fn as_slice(&self) -> &[String] {
    &self.names
  }

  /// Number of distinct bundles recorded.
  pub fn len(&self) -> usize {
    self.names.len()
  }

  /// Returns true when nothing has been recorded.
  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }
}

/// Files accumulated for one task, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestData {
  /// Absolute stylesheet paths.
  pub css: Vec<PathBuf>,
  /// Absolute script paths.
  pub js: Vec<PathBuf>,
}

impl ManifestData {
  /// Append a file under the given kind.
  pub fn push(&mut self, kind: AssetKind, path: PathBuf) {
    match kind {
      AssetKind::Css => self.css.push(path),
      AssetKind::Js => self.js.push(path),
    }
  }

  /// Files recorded for the given kind.
  pub fn files(&self, kind: AssetKind) -> &[PathBuf] {
    match kind {
      AssetKind::Css => &self.css,
      AssetKind::Js => &self.js,
    }
  }

  /// Stylesheets followed by scripts.
  pub fn combined(&self) -> Vec<PathBuf> {
    self.css.iter().chain(self.js.iter()).cloned().collect()
  }

  /// Returns true when neither list holds a file.
  pub fn is_empty(&self) -> bool {
    self.css.is_empty() && self.js.is_empty()
  }
}

//! Bundle registry port and the declarative registry shipped with the tool.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;

use crate::models::Bundle;

/// Source of asset bundle declarations.
///
/// The scanner only discovers bundle *names*; whatever owns the bundle
/// definitions in the host project is plugged in through this trait.
pub trait BundleRegistry {
  /// Resolve every name, in order. Fails on the first unknown name.
  fn resolve(&self, names: &[String]) -> Result<Vec<Bundle>, RegistryError>;
}

/// Errors raised while loading or querying a bundle registry.
#[derive(Debug, Error)]
pub enum RegistryError {
  /// No bundle is registered under the name.
  #[error("Unable to locate asset bundle '{name}'")]
  UnknownBundle {
    /// Requested bundle name.
    name: String,
  },
  /// The bundle gives no directory to resolve its files against.
  #[error("asset bundle '{name}' declares neither 'sourcePath' nor 'basePath'")]
  MissingDirectory {
    /// Offending bundle name.
    name: String,
  },
  /// Failed to read the registry file from disk.
  #[error("failed to read bundle registry {}: {source}", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the registry file.
  #[error("failed to parse bundle registry {}: {reason}", .path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Parser message.
    reason: String,
  },
}

/// Registry backed by bundle declarations written in configuration files.
///
/// Names are compared without a leading namespace separator, so `\app\assets\AppAsset`
/// and `app\assets\AppAsset` refer to the same bundle.
#[derive(Debug, Clone, Default)]
pub struct StaticBundleRegistry {
  bundles: IndexMap<String, Bundle>,
}

impl StaticBundleRegistry {
  /// Build a registry from a name → declaration map.
  pub fn from_map(bundles: IndexMap<String, Bundle>) -> Self {
    let mut registry = Self::default();
    for (name, bundle) in bundles {
      registry.insert(name, bundle);
    }
    registry
  }

  /// Load a registry file: a JSON (`.json`) or YAML map of bundle declarations.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| RegistryError::Io {
      path: path.to_path_buf(),
      source,
    })?;

    let is_json = path
      .extension()
      .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed: Result<Option<IndexMap<String, Bundle>>, String> = if is_json {
      serde_json::from_str(&content).map_err(|err| err.to_string())
    } else {
      serde_yaml::from_str(&content).map_err(|err| err.to_string())
    };

    let bundles = parsed.map_err(|reason| RegistryError::Parse {
      path: path.to_path_buf(),
      reason,
    })?;
    Ok(Self::from_map(bundles.unwrap_or_default()))
  }

  /// Register a bundle, replacing any previous declaration under the same name.
  pub fn insert(&mut self, name: impl AsRef<str>, mut bundle: Bundle) {
    let key = normalise_name(name.as_ref()).to_string();
    bundle.name = key.clone();
    self.bundles.insert(key, bundle);
  }

  /// Add declarations from `fallback` that this registry does not already have.
  pub fn extend_missing(&mut self, fallback: StaticBundleRegistry) {
    for (name, bundle) in fallback.bundles {
      self.bundles.entry(name).or_insert(bundle);
    }
  }

  /// Number of registered bundles.
  pub fn len(&self) -> usize {
    self.bundles.len()
  }

  /// Returns true when no bundle is registered.
  pub fn is_empty(&self) -> bool {
    self.bundles.is_empty()
  }
}

impl BundleRegistry for StaticBundleRegistry {
  fn resolve(&self, names: &[String]) -> Result<Vec<Bundle>, RegistryError> {
    names
      .iter()
      .map(|name| {
        let bundle = self
          .bundles
          .get(normalise_name(name))
          .ok_or_else(|| RegistryError::UnknownBundle { name: name.clone() })?;
        if bundle.effective_dir().is_none_or(str::is_empty) {
          return Err(RegistryError::MissingDirectory { name: name.clone() });
        }
        Ok(bundle.clone())
      })
      .collect()
  }
}

fn normalise_name(name: &str) -> &str {
  name.trim().trim_start_matches('\\')
}

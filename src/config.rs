//! Configuration file loader for `create-list` runs.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::error::{DependenceError, DependenceResult};
use crate::models::Bundle;

const DEFAULT_VIEW_PATH: &str = "@app/views";
const DEFAULT_SOURCE_EXTENSION: &str = "php";

/// Whole configuration file.
///
/// Every section may be omitted or left empty (a YAML key whose children are all
/// commented out parses as null). Tasks keep their declaration order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependenceConfig {
  /// Path aliases (`@app`, `@webroot`, ...) mapped to directories.
  #[serde(default, deserialize_with = "nullable")]
  pub aliases: IndexMap<String, String>,
  /// Output and scanning settings.
  #[serde(default, deserialize_with = "nullable")]
  pub dependence_manager: DependenceManagerConfig,
  /// Inline bundle registry keyed by fully-qualified bundle name.
  #[serde(default, deserialize_with = "nullable")]
  pub bundles: IndexMap<String, Bundle>,
  /// Named tasks, each producing one manifest group.
  #[serde(default, deserialize_with = "nullable")]
  pub task: IndexMap<String, TaskConfig>,
}

/// Raw `dependenceManager` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependenceManagerConfig {
  /// Directory manifests are written to.
  pub config_path: Option<String>,
  /// Namespace prepended to bundle names discovered in source files.
  pub namespace_asset: Option<String>,
  /// Root directory of view files referenced by controllers.
  pub view_path: Option<String>,
  /// Extension of scanned source files, without the dot.
  pub source_extension: Option<String>,
  /// Optional external bundle registry file (JSON or YAML).
  pub registry_path: Option<String>,
}

/// Validated settings shared by every task of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependenceSettings {
  /// Output directory, before alias resolution.
  pub config_path: String,
  /// Namespace prefix for discovered bundle names.
  pub namespace_asset: String,
  /// Views root, before alias resolution.
  pub view_path: String,
  /// Source file extension without the dot.
  pub source_extension: String,
  /// External registry file, before alias resolution.
  pub registry_path: Option<String>,
}

/// One `task` entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskConfig {
  /// Source roots: directories, files, or bundle class names.
  #[serde(default)]
  pub src: StringList,
  /// Bundle names and file names left out of the manifests.
  #[serde(default)]
  pub exclude: StringList,
}

impl TaskConfig {
  /// Source roots, failing when none were given.
  pub fn sources(&self) -> DependenceResult<&[String]> {
    if self.src.is_empty() {
      return Err(DependenceError::config(
        "Please specify 'src' for the 'task' option.",
      ));
    }
    Ok(self.src.as_slice())
  }

  /// Exclude entries; a scalar in the file becomes a one-element list.
  pub fn exclude(&self) -> &[String] {
    self.exclude.as_slice()
  }
}

/// A value written either as a single string or as a list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringList(Vec<String>);

impl StringList {
  /// Entries in declaration order, empty strings dropped.
  pub fn as_slice(&self) -> &[String] {
    &self.0
  }

  /// Returns true when no usable entry was given.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl From<Vec<String>> for StringList {
  fn from(values: Vec<String>) -> Self {
    Self(values.into_iter().filter(|value| !value.is_empty()).collect())
  }
}

impl<'de> Deserialize<'de> for StringList {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      One(String),
      Many(Vec<String>),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
      Some(Raw::One(value)) => Self::from(vec![value]),
      Some(Raw::Many(values)) => Self::from(values),
      None => Self::default(),
    })
  }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl DependenceConfig {
  /// Read configuration from a JSON (`.json`) or YAML (anything else) file.
  pub fn from_path(path: &Path) -> DependenceResult<Self> {
    let content = fs::read_to_string(path).map_err(|source| DependenceError::ConfigRead {
      path: path.to_path_buf(),
      source,
    })?;

    let is_json = path
      .extension()
      .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
      serde_json::from_str(&content).map_err(|err| err.to_string())
    } else {
      serde_yaml::from_str(&content).map_err(|err| err.to_string())
    };

    parsed.map_err(|reason| DependenceError::ConfigParse {
      path: path.to_path_buf(),
      reason,
    })
  }

  /// Validate the `dependenceManager` section, applying defaults for optional keys.
  pub fn settings(&self) -> DependenceResult<DependenceSettings> {
    let manager = &self.dependence_manager;
    let config_path = required(&manager.config_path).ok_or_else(|| {
      DependenceError::config("Please specify 'configPath' for the 'dependenceManager' option.")
    })?;
    let namespace_asset = required(&manager.namespace_asset).ok_or_else(|| {
      DependenceError::config(
        "Please specify 'namespaceAsset' for the 'dependenceManager' option.",
      )
    })?;

    Ok(DependenceSettings {
      config_path: config_path.to_string(),
      namespace_asset: namespace_asset.to_string(),
      view_path: required(&manager.view_path)
        .unwrap_or(DEFAULT_VIEW_PATH)
        .to_string(),
      source_extension: required(&manager.source_extension)
        .map(|ext| ext.trim_start_matches('.'))
        .unwrap_or(DEFAULT_SOURCE_EXTENSION)
        .to_string(),
      registry_path: required(&manager.registry_path).map(str::to_string),
    })
  }
}

fn required(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|value| !value.is_empty())
}

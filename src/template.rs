//! Skeleton configuration file for the `template` command.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use inquire::Confirm;
use tracing::info;

const TEMPLATE: &str = r##"# Configuration file for the "asset-deps create-list" command.

# Path aliases usable in every path below, e.g. "@app/views" or "@webroot/css".
# Environment variables can be referenced as $VAR or ${VAR}.
aliases:
  # "@app": /srv/app
  # "@webroot": /srv/app/web

# Dependence manager configuration:
dependenceManager:
  # Directory the JSON manifests are written to (required).
  # configPath: "@webroot"
  # Namespace prepended to bundle names found in source files (required).
  # namespaceAsset: 'app\assets\'
  # Root of the view files rendered by controllers.
  # viewPath: "@app/views"
  # Extension of the scanned source files.
  # sourceExtension: php
  # Additional bundle declarations kept in a separate JSON or YAML file.
  # registryPath: "@app/config/bundles.yaml"

# Asset bundle declarations keyed by fully-qualified bundle name:
bundles:
  # 'app\assets\AppAsset':
  #   basePath: "@webroot"
  #   css:
  #     - css/site.css
  #   js: []
  # 'yii\web\YiiAsset':
  #   sourcePath: "@app/vendor/yiisoft/yii2/assets"
  #   js:
  #     - yii.js

# The list of tasks; each one writes <task>-css.json, <task>-js.json and <task>.json:
task:
  # all:
  #   src:
  #     - "@app/assets"
  # yii:
  #   src:
  #     - 'yii\web\YiiAsset'
  #     - 'yii\grid\GridViewAsset'
  #     - 'yii\captcha\CaptchaAsset'
  #     - 'yii\validators\ValidationAsset'
  #     - 'yii\widgets\ActiveFormAsset'
  #     - 'yii\widgets\MaskedInputAsset'
  #   exclude:
  #     - jquery.pjax.js
  # single-page:
  #   src:
  #     - "@app/views/default/index.php"
  # controller:
  #   src:
  #     - "@app/controllers/DefaultController.php"
"##;

/// Decides whether an existing file may be replaced.
pub trait OverwritePrompt {
  /// Returns `true` when `path` should be overwritten.
  fn confirm_overwrite(&self, path: &Path) -> Result<bool>;
}

/// Asks on the terminal, defaulting to keeping the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl OverwritePrompt for TerminalPrompt {
  fn confirm_overwrite(&self, path: &Path) -> Result<bool> {
    Confirm::new(&format!(
      "File '{}' already exists. Do you wish to overwrite it?",
      path.display()
    ))
    .with_default(false)
    .prompt()
    .context("failed to read overwrite confirmation")
  }
}

/// Fixed answer used in non-interactive runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct PresetAnswer(pub bool);

impl OverwritePrompt for PresetAnswer {
  fn confirm_overwrite(&self, _path: &Path) -> Result<bool> {
    Ok(self.0)
  }
}

/// What [`emit_template`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateOutcome {
  /// A new file was written.
  Created,
  /// An existing file was replaced.
  Overwritten,
  /// The existing file was left untouched.
  Kept,
}

/// The skeleton written by [`emit_template`].
pub fn template() -> &'static str {
  TEMPLATE
}

/// Write the configuration skeleton to `path`, asking before replacing a file.
pub fn emit_template(path: &Path, prompt: &impl OverwritePrompt) -> Result<TemplateOutcome> {
  let existed = path.exists();
  if existed && !prompt.confirm_overwrite(path)? {
    return Ok(TemplateOutcome::Kept);
  }

  fs::write(path, TEMPLATE)
    .with_context(|| format!("Unable to write template file '{}'.", path.display()))?;
  info!("Configuration file template created at '{}'.", path.display());

  Ok(if existed {
    TemplateOutcome::Overwritten
  } else {
    TemplateOutcome::Created
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::DependenceConfig;
  use tempfile::tempdir;

  #[test]
  fn writes_parseable_skeleton() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deps.yaml");

    let outcome = emit_template(&path, &PresetAnswer(false)).unwrap();
    assert_eq!(outcome, TemplateOutcome::Created);

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("# configPath:"));
    assert!(content.contains("# namespaceAsset:"));

    let config = DependenceConfig::from_path(&path).unwrap();
    assert!(config.task.is_empty());
    assert!(config.aliases.is_empty());
  }

  #[test]
  fn commented_examples_parse_once_uncommented() {
    let uncommented: String = TEMPLATE
      .lines()
      .map(|line| match line.split_once("  # ") {
        Some((indent, rest)) if indent.trim().is_empty() && (rest.contains(':') || rest.trim_start().starts_with('-')) => {
          format!("{indent}  {rest}")
        }
        _ => line.to_string(),
      })
      .collect::<Vec<_>>()
      .join("\n");
    let config: DependenceConfig = serde_yaml::from_str(&uncommented).unwrap();

    assert_eq!(config.task.len(), 4);
    assert_eq!(config.task["yii"].exclude(), ["jquery.pjax.js"]);
    assert_eq!(config.settings().unwrap().namespace_asset, "app\\assets\\");
  }

  #[test]
  fn keeps_existing_file_when_declined() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deps.yaml");
    fs::write(&path, "original").unwrap();

    let outcome = emit_template(&path, &PresetAnswer(false)).unwrap();
    assert_eq!(outcome, TemplateOutcome::Kept);
    assert_eq!(fs::read_to_string(&path).unwrap(), "original");
  }

  #[test]
  fn overwrites_existing_file_when_confirmed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deps.yaml");
    fs::write(&path, "original").unwrap();

    let outcome = emit_template(&path, &PresetAnswer(true)).unwrap();
    assert_eq!(outcome, TemplateOutcome::Overwritten);
    assert_eq!(fs::read_to_string(&path).unwrap(), template());
  }

  #[test]
  fn write_failure_is_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("deps.yaml");
    let err = emit_template(&path, &PresetAnswer(true)).unwrap_err();
    assert!(err.to_string().contains("Unable to write template file"));
  }
}

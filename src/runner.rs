//! Task runner tying scanning, bundle expansion and manifest writing together.

use std::path::Path;

use tracing::{debug, info};

use crate::asset_paths::AliasResolver;
use crate::bundle::{BundleRegistry, StaticBundleRegistry, expand_bundles};
use crate::config::{DependenceConfig, DependenceSettings, TaskConfig};
use crate::error::DependenceResult;
use crate::manifest::{ManifestWriter, WriteReport};
use crate::models::ManifestData;
use crate::scanner::scan_sources;

/// What one task produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
  /// Task name as declared in the configuration.
  pub name: String,
  /// Bundles resolved for the task, after exclusions.
  pub bundles: Vec<String>,
  /// Files gathered from those bundles.
  pub data: ManifestData,
  /// Manifest files written or failed.
  pub report: WriteReport,
}

/// Per-task summaries of a `create-list` run, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
  /// One entry per configured task.
  pub tasks: Vec<TaskSummary>,
}

impl RunSummary {
  /// Number of manifests that could not be written.
  pub fn failed_writes(&self) -> usize {
    self.tasks.iter().map(|task| task.report.failed.len()).sum()
  }
}

/// Runs every configured task against a bundle registry.
pub struct DependenceRunner<'a, R> {
  config: &'a DependenceConfig,
  registry: R,
}

impl<'a, R: BundleRegistry> DependenceRunner<'a, R> {
  /// Create a runner for the configuration and registry.
  pub fn new(config: &'a DependenceConfig, registry: R) -> Self {
    Self { config, registry }
  }

  /// Run every task in declaration order.
  ///
  /// Missing required settings abort before any task runs. A fatal error in a
  /// task aborts the run; manifests written by earlier tasks stay on disk.
  pub fn run(&self) -> DependenceResult<RunSummary> {
    let settings = self.config.settings()?;
    let aliases = AliasResolver::new(&self.config.aliases);
    let writer = ManifestWriter::new(aliases.resolve_path(&settings.config_path)?);

    let mut summary = RunSummary::default();
    for (name, task) in &self.config.task {
      summary
        .tasks
        .push(self.run_task(name, task, &settings, &aliases, &writer)?);
    }
    Ok(summary)
  }

  fn run_task(
    &self,
    name: &str,
    task: &TaskConfig,
    settings: &DependenceSettings,
    aliases: &AliasResolver,
    writer: &ManifestWriter,
  ) -> DependenceResult<TaskSummary> {
    info!("Parse section '{name}'");

    let exclude = task.exclude();
    let bundle_names = scan_sources(task.sources()?, exclude, settings, aliases)?;
    debug!(task = name, bundles = bundle_names.len(), "scan complete");

    let mut data = ManifestData::default();
    let mut report = WriteReport::default();
    if !bundle_names.is_empty() {
      let bundles = self.registry.resolve(bundle_names.as_slice())?;
      expand_bundles(&bundles, exclude, aliases, &mut data)?;
      report = writer.write(name, &data);
    }

    Ok(TaskSummary {
      name: name.to_string(),
      bundles: bundle_names.as_slice().to_vec(),
      data,
      report,
    })
  }
}

/// Build the registry described by the configuration: inline `bundles` first,
/// then any declarations from `dependenceManager.registryPath` not already present.
pub fn registry_from_config(
  config: &DependenceConfig,
  settings: &DependenceSettings,
) -> DependenceResult<StaticBundleRegistry> {
  let mut registry = StaticBundleRegistry::from_map(config.bundles.clone());
  if let Some(registry_path) = &settings.registry_path {
    let aliases = AliasResolver::new(&config.aliases);
    let path = aliases.resolve_path(registry_path)?;
    registry.extend_missing(StaticBundleRegistry::load_from_path(&path)?);
  }
  Ok(registry)
}

/// Load the configuration file and run the whole `create-list` pipeline.
pub fn create_list(config_file: &Path) -> DependenceResult<RunSummary> {
  let config = DependenceConfig::from_path(config_file)?;
  let settings = config.settings()?;
  let registry = registry_from_config(&config, &settings)?;
  DependenceRunner::new(&config, registry).run()
}

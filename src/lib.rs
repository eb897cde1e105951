#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod bundle;
pub mod config;
pub mod error;
/// Terminal logging setup for the CLI.
pub mod logging;
pub mod manifest;
pub mod models;
pub mod runner;
pub mod scanner;
pub mod template;

pub use bundle::{BundleRegistry, RegistryError, StaticBundleRegistry};
pub use config::{DependenceConfig, DependenceSettings, TaskConfig};
pub use error::{DependenceError, DependenceResult};
pub use runner::{DependenceRunner, RunSummary, TaskSummary, create_list};

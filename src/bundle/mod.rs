//! Bundle resolution: the registry port and expansion of bundles into file lists.

mod expand;
mod registry;

pub use expand::expand_bundles;
pub use registry::{BundleRegistry, RegistryError, StaticBundleRegistry};

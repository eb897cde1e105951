//! JSON dependency manifests consumed by front-end build tools.

mod writer;

pub use writer::{ManifestWriter, WriteReport, encode};

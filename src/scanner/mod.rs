//! Discovery of bundle references in a task's source roots.

mod patterns;

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::asset_paths::AliasResolver;
use crate::config::DependenceSettings;
use crate::error::{DependenceError, DependenceResult};
use crate::models::BundleSet;

pub use patterns::{is_bundle_class_reference, registered_bundle, rendered_view};

/// Walks source roots and records the bundle names they reference.
///
/// A root may be a directory (its source files are scanned, one level deep), a
/// bundle class name, or a single source file. Files are classified by name:
/// `*Asset.<ext>` declares a bundle, `*Controller.<ext>` renders views, anything
/// else is a view that registers bundles.
pub struct SourceScanner<'a> {
    settings: &'a DependenceSettings,
    aliases: &'a AliasResolver,
    bundles: BundleSet,
}

impl<'a> SourceScanner<'a> {
    /// Create a scanner with an empty bundle collection.
    pub fn new(settings: &'a DependenceSettings, aliases: &'a AliasResolver) -> Self {
        Self {
            settings,
            aliases,
            bundles: BundleSet::new(),
        }
    }

    /// Scan every root once, in order. Duplicate roots are skipped.
    pub fn scan_roots(&mut self, roots: &[String]) -> DependenceResult<()> {
        let mut seen = Vec::with_capacity(roots.len());
        for root in roots {
            if seen.contains(&root) {
                continue;
            }
            seen.push(root);
            self.scan_root(root)?;
        }
        Ok(())
    }

    /// Scan one configured root.
    pub fn scan_root(&mut self, root: &str) -> DependenceResult<()> {
        let resolved = self.aliases.resolve(root)?;
        let path = Path::new(&resolved);

        if path.is_dir() {
            self.scan_directory(path)
        } else if is_bundle_class_reference(&resolved) {
            debug!(bundle = %resolved, "bundle class reference");
            self.bundles.insert(resolved.clone());
            Ok(())
        } else if path.is_file() {
            self.scan_file(path)
        } else {
            warn!(root = %root, "source root is neither a directory, a file nor a bundle class; skipping");
            Ok(())
        }
    }

    /// Classify a single file by name and scan it accordingly.
    pub fn scan_file(&mut self, path: &Path) -> DependenceResult<()> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if let Some(class_name) = self.class_name(&file_name, "Asset") {
            let bundle = format!("{}{}", self.settings.namespace_asset, class_name);
            debug!(file = %path.display(), bundle = %bundle, "bundle class file");
            self.bundles.insert(bundle);
            Ok(())
        } else if let Some(class_name) = self.class_name(&file_name, "Controller") {
            let controller_id = class_name
                .strip_suffix("Controller")
                .unwrap_or(class_name)
                .to_lowercase();
            self.scan_controller(path, &controller_id)
        } else {
            self.scan_view(path)
        }
    }

    /// Consume the scanner, returning the collected bundle names.
    pub fn into_bundles(self) -> BundleSet {
        self.bundles
    }

    fn scan_directory(&mut self, dir: &Path) -> DependenceResult<()> {
        let suffix = format!(".{}", self.settings.source_extension);
        let entries = fs::read_dir(dir).map_err(|err| DependenceError::io(dir, err))?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| DependenceError::io(dir, err))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') || !name.ends_with(&suffix) {
                continue;
            }
            if entry.file_type().is_ok_and(|ft| ft.is_file()) || entry.path().is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        for file in files {
            self.scan_file(&file)?;
        }
        Ok(())
    }

    fn scan_controller(&mut self, path: &Path, controller_id: &str) -> DependenceResult<()> {
        let view_root = self.aliases.resolve(&self.settings.view_path)?;
        let mut views = Vec::new();
        for_each_line(path, |line| {
            if let Some(view) = rendered_view(line) {
                views.push(PathBuf::from(format!(
                    "{view_root}/{controller_id}/{view}.{}",
                    self.settings.source_extension
                )));
            }
        })?;

        for view in views {
            debug!(controller = %path.display(), view = %view.display(), "rendered view");
            self.scan_view(&view)?;
        }
        Ok(())
    }

    fn scan_view(&mut self, path: &Path) -> DependenceResult<()> {
        let namespace = &self.settings.namespace_asset;
        let bundles = &mut self.bundles;
        for_each_line(path, |line| {
            if let Some(class_name) = registered_bundle(line) {
                bundles.insert(format!("{namespace}{class_name}"));
            }
        })
    }

    /// Class name (file name without extension) when the file is named `*<kind>.<ext>`
    /// with a non-empty prefix.
    fn class_name<'n>(&self, file_name: &'n str, kind: &str) -> Option<&'n str> {
        let class_name = file_name.strip_suffix(&format!(".{}", self.settings.source_extension))?;
        (class_name.len() > kind.len() && class_name.ends_with(kind)).then_some(class_name)
    }
}

/// Stream a file line by line. A missing file is a fatal [`DependenceError::MissingFile`].
fn for_each_line(path: &Path, mut visit: impl FnMut(&str)) -> DependenceResult<()> {
    if !path.is_file() {
        return Err(DependenceError::MissingFile(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|err| DependenceError::io(path, err))?;
    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|err| DependenceError::io(path, err))?;
        if read == 0 {
            break;
        }
        visit(&String::from_utf8_lossy(&buffer));
    }
    Ok(())
}

/// Scan `roots` and return the bundle names found, minus exact-match exclusions.
pub fn scan_sources(
    roots: &[String],
    exclude: &[String],
    settings: &DependenceSettings,
    aliases: &AliasResolver,
) -> DependenceResult<BundleSet> {
    let mut scanner = SourceScanner::new(settings, aliases);
    scanner.scan_roots(roots)?;
    let mut bundles = scanner.into_bundles();
    bundles.remove_excluded(exclude);
    Ok(bundles)
}

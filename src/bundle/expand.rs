//! Expansion of resolved bundles into the absolute file lists written to manifests.

use std::path::PathBuf;

use tracing::debug;

use crate::asset_paths::{AliasResolver, is_file_excluded};
use crate::error::DependenceResult;
use crate::models::{AssetKind, Bundle, ManifestData};

/// Append every existing, non-excluded file of `bundles` to `data`.
///
/// Bundles are visited in order, stylesheets before scripts within each bundle.
/// Files missing on disk are skipped without error so partially built asset trees
/// still produce a manifest.
pub fn expand_bundles(
    bundles: &[Bundle],
    exclude: &[String],
    aliases: &AliasResolver,
    data: &mut ManifestData,
) -> DependenceResult<()> {
    for bundle in bundles {
        let Some(dir) = bundle.effective_dir() else {
            continue;
        };
        let source_dir = aliases.resolve(dir)?;

        for kind in AssetKind::ALL {
            for file_name in bundle.files(kind) {
                if is_file_excluded(file_name, exclude) {
                    debug!(bundle = %bundle.name, file = %file_name, "excluded");
                    continue;
                }

                let path = PathBuf::from(format!("{source_dir}/{file_name}"));
                if path.exists() {
                    data.push(kind, path);
                } else {
                    debug!(bundle = %bundle.name, path = %path.display(), "missing on disk");
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "/* asset */").unwrap();
    }

    fn bundle(name: &str, dir: &Path, css: &[&str], js: &[&str]) -> Bundle {
        Bundle {
            name: name.into(),
            base_path: Some(dir.display().to_string()),
            css: css.iter().map(|v| v.to_string()).collect(),
            js: js.iter().map(|v| v.to_string()).collect(),
            ..Bundle::default()
        }
    }

    fn src(dir: &Path, file: &str) -> PathBuf {
        PathBuf::from(format!("{}/{file}", dir.display()))
    }

    #[test]
    fn drops_minified_variant_of_excluded_file() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for file in ["a.css", "b.min.css", "c.js"] {
            touch(root, file);
        }

        let bundles = [bundle("app\\assets\\AppAsset", root, &["a.css", "b.min.css"], &["c.js"])];
        let mut data = ManifestData::default();
        expand_bundles(&bundles, &["b.css".into()], &AliasResolver::default(), &mut data).unwrap();

        assert_eq!(data.css, vec![src(root, "a.css")]);
        assert_eq!(data.js, vec![src(root, "c.js")]);
    }

    #[test]
    fn skips_files_missing_on_disk() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, "js/present.js");

        let bundles = [bundle("app\\assets\\AppAsset", root, &["css/gone.css"], &[
            "js/present.js",
            "js/gone.js",
        ])];
        let mut data = ManifestData::default();
        expand_bundles(&bundles, &[], &AliasResolver::default(), &mut data).unwrap();

        assert!(data.css.is_empty());
        assert_eq!(data.js, vec![src(root, "js/present.js")]);
    }

    #[test]
    fn file_exclusion_applies_across_bundles() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        for root in [&first, &second] {
            touch(root, "jquery.js");
            touch(root, "app.js");
        }

        let bundles = [
            bundle("a\\OneAsset", &first, &[], &["jquery.js", "app.js"]),
            bundle("a\\TwoAsset", &second, &[], &["jquery.min.js", "app.js"]),
        ];
        let mut data = ManifestData::default();
        expand_bundles(&bundles, &["jquery.js".into()], &AliasResolver::default(), &mut data)
            .unwrap();

        assert_eq!(data.js, vec![src(&first, "app.js"), src(&second, "app.js")]);
    }

    #[test]
    fn source_path_takes_precedence_and_resolves_aliases() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, "src/site.css");
        touch(root, "web/site.css");

        let mut aliases = indexmap::IndexMap::new();
        aliases.insert("@root".to_string(), root.display().to_string());
        let resolver = AliasResolver::new(&aliases);

        let bundles = [Bundle {
            name: "app\\assets\\AppAsset".into(),
            source_path: Some("@root/src".into()),
            base_path: Some("@root/web".into()),
            css: vec!["site.css".into()],
            js: Vec::new(),
        }];
        let mut data = ManifestData::default();
        expand_bundles(&bundles, &[], &resolver, &mut data).unwrap();

        assert_eq!(data.css, vec![PathBuf::from(format!("{}/src/site.css", root.display()))]);
    }
}

//! Serialisation of accumulated task files into JSON manifests.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::models::{AssetKind, ManifestData};

/// Outcome of writing one task's manifests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Manifests written successfully, in write order.
    pub written: Vec<PathBuf>,
    /// Manifests that could not be written, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

/// Writes `<task>-css.json`, `<task>-js.json` and `<task>.json` into one directory.
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    output_dir: PathBuf,
}

impl ManifestWriter {
    /// Create a writer targeting an existing directory. The directory is never created.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory manifests are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every non-empty manifest for the task.
    ///
    /// A failed write is logged and recorded in the report; the remaining
    /// manifests are still attempted.
    pub fn write(&self, task: &str, data: &ManifestData) -> WriteReport {
        let mut report = WriteReport::default();

        for kind in AssetKind::ALL {
            let files = data.files(kind);
            if files.is_empty() {
                continue;
            }
            let target = self.output_dir.join(format!("{task}-{}.json", kind.as_str()));
            self.write_list(&target, files, &mut report);
        }

        let combined = data.combined();
        if !combined.is_empty() {
            let target = self.output_dir.join(format!("{task}.json"));
            self.write_list(&target, &combined, &mut report);
        }

        report
    }

    fn write_list(&self, target: &Path, files: &[PathBuf], report: &mut WriteReport) {
        match fs::write(target, encode(files)) {
            Ok(()) => {
                info!("Data written to a file {}", target.display());
                report.written.push(target.to_path_buf());
            }
            Err(err) => {
                error!("failed to write {}: {}", target.display(), err);
                report.failed.push((target.to_path_buf(), err.to_string()));
            }
        }
    }
}

/// Compact JSON array of path strings.
pub fn encode(files: &[PathBuf]) -> String {
    let entries: Vec<String> = files
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    serde_json::Value::from(entries).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn data(css: &[&str], js: &[&str]) -> ManifestData {
        ManifestData {
            css: css.iter().map(PathBuf::from).collect(),
            js: js.iter().map(PathBuf::from).collect(),
        }
    }

    #[test]
    fn writes_css_js_and_combined_manifests() {
        let dir = tempdir().unwrap();
        let writer = ManifestWriter::new(dir.path());
        let report = writer.write("test", &data(&["/web/a.css"], &["/web/c.js"]));

        assert!(report.failed.is_empty());
        assert_eq!(report.written, vec![
            dir.path().join("test-css.json"),
            dir.path().join("test-js.json"),
            dir.path().join("test.json"),
        ]);
        assert_eq!(
            fs::read_to_string(dir.path().join("test.json")).unwrap(),
            r#"["/web/a.css","/web/c.js"]"#
        );
    }

    #[test]
    fn skips_empty_lists() {
        let dir = tempdir().unwrap();
        let writer = ManifestWriter::new(dir.path());

        let report = writer.write("scripts", &data(&[], &["/web/app.js"]));
        assert!(!dir.path().join("scripts-css.json").exists());
        assert_eq!(report.written.len(), 2);

        let report = writer.write("empty", &ManifestData::default());
        assert!(report.written.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn failed_writes_do_not_stop_remaining_manifests() {
        let dir = tempdir().unwrap();
        let writer = ManifestWriter::new(dir.path());
        fs::create_dir(dir.path().join("blocked-css.json")).unwrap();

        let report = writer.write("blocked", &data(&["/web/a.css"], &["/web/c.js"]));
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, dir.path().join("blocked-css.json"));
        assert!(dir.path().join("blocked-js.json").is_file());
        assert!(dir.path().join("blocked.json").is_file());
    }

    #[test]
    fn missing_output_directory_is_reported() {
        let dir = tempdir().unwrap();
        let writer = ManifestWriter::new(dir.path().join("missing"));
        let report = writer.write("test", &data(&["/web/a.css"], &[]));

        assert!(report.written.is_empty());
        assert_eq!(report.failed.len(), 2);
    }

    #[test]
    fn encoding_keeps_slashes_unescaped() {
        assert_eq!(
            encode(&[PathBuf::from("/srv/app/web/css/site.css")]),
            r#"["/srv/app/web/css/site.css"]"#
        );
        assert_eq!(encode(&[]), "[]");
    }
}

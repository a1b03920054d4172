//! Publisher configuration.
//!
//! Settings come from an optional `publisher.toml`. Every key has a default,
//! so a missing file yields a working configuration.

mod error;
mod flow;
mod labels;

pub use error::ConfigError;
pub use flow::{FlowConfig, FlowKind};
pub use labels::{parse_label_list, LabelSpec};

use crate::templates::defaults;
use flow::FlowOverrides;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Raw contents of `publisher.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    #[serde(default = "default_base_branch")]
    base_branch: String,
    #[serde(default = "default_remote")]
    remote: String,
    #[serde(default = "default_label_color")]
    label_color: String,
    #[serde(default = "default_label_description")]
    label_description: String,
    #[serde(default = "default_scanners")]
    scanners: Vec<String>,
    #[serde(default = "default_results_dir")]
    results_dir: PathBuf,
    #[serde(default = "default_summary_file")]
    summary_file: PathBuf,
    #[serde(default)]
    summary: FlowOverrides,
    #[serde(default)]
    scan: FlowOverrides,
}

pub(crate) fn default_base_branch() -> String {
    "main".to_string()
}

pub(crate) fn default_remote() -> String {
    "origin".to_string()
}

pub(crate) fn default_label_color() -> String {
    "d73a4a".to_string()
}

pub(crate) fn default_label_description() -> String {
    "Created by scan-publisher".to_string()
}

pub(crate) fn default_scanners() -> Vec<String> {
    ["grype", "trivy", "osv-scanner"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub(crate) fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

pub(crate) fn default_summary_file() -> PathBuf {
    PathBuf::from("SCAN_RESULTS.md")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            base_branch: default_base_branch(),
            remote: default_remote(),
            label_color: default_label_color(),
            label_description: default_label_description(),
            scanners: default_scanners(),
            results_dir: default_results_dir(),
            summary_file: default_summary_file(),
            summary: FlowOverrides::default(),
            scan: FlowOverrides::default(),
        }
    }
}

/// Resolved publisher configuration.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Branch PRs are opened against.
    pub base_branch: String,

    /// Remote branches are pushed to.
    pub remote: String,

    /// Scanners whose temporary result files are merged by aggregation.
    pub scanners: Vec<String>,

    /// Directory holding per-repository violations files.
    pub results_dir: PathBuf,

    /// Generated summary table.
    pub summary_file: PathBuf,

    /// Settings for the summary flow.
    pub summary: FlowConfig,

    /// Settings for the scan-results flow.
    pub scan: FlowConfig,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        let file = ConfigFile::default();
        Self {
            summary: resolve_flow(&file, FlowKind::Summary, &file.summary, String::new()),
            scan: resolve_flow(&file, FlowKind::ScanResults, &file.scan, String::new()),
            base_branch: file.base_branch,
            remote: file.remote,
            scanners: file.scanners,
            results_dir: file.results_dir,
            summary_file: file.summary_file,
        }
    }
}

impl PublisherConfig {
    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, malformed,
    /// references a missing template, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading publisher config");

        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let summary_body = load_body_template(base_dir, file.summary.pr_body_template.as_deref())?;
        let scan_body = load_body_template(base_dir, file.scan.pr_body_template.as_deref())?;

        let config = Self {
            summary: resolve_flow(&file, FlowKind::Summary, &file.summary, summary_body),
            scan: resolve_flow(&file, FlowKind::ScanResults, &file.scan, scan_body),
            base_branch: file.base_branch,
            remote: file.remote,
            scanners: file.scanners,
            results_dir: file.results_dir,
            summary_file: file.summary_file,
        };

        config.validate(path, &file.label_color)?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be loaded.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            info!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Returns the settings for `kind`.
    #[must_use]
    pub fn flow(&self, kind: FlowKind) -> &FlowConfig {
        match kind {
            FlowKind::Summary => &self.summary,
            FlowKind::ScanResults => &self.scan,
        }
    }

    fn validate(&self, path: &Path, label_color: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::Invalid {
            path: path.display().to_string(),
            message,
        };

        if self.base_branch.trim().is_empty() {
            return Err(invalid("base-branch must not be empty".to_string()));
        }

        if self.remote.trim().is_empty() {
            return Err(invalid("remote must not be empty".to_string()));
        }

        let color = label_color.trim_start_matches('#');
        if !labels::is_hex_color(color) {
            return Err(invalid(format!(
                "label-color must be six hex digits: {label_color}"
            )));
        }

        for scanner in &self.scanners {
            if scanner.trim().is_empty() || scanner.contains(['/', '\\']) {
                return Err(invalid(format!("invalid scanner name: '{scanner}'")));
            }
        }

        for kind in [FlowKind::Summary, FlowKind::ScanResults] {
            let flow = self.flow(kind);
            if let Err(e) = crate::branch::validate_branch_name(&flow.branch_prefix) {
                return Err(invalid(format!("[{kind}] branch-prefix: {e}")));
            }
            if flow.paths.iter().all(|p| p.trim().is_empty()) {
                return Err(invalid(format!("[{kind}] paths must not be empty")));
            }
        }

        Ok(())
    }
}

/// Applies `overrides` on top of the defaults for `kind`.
fn resolve_flow(
    file: &ConfigFile,
    kind: FlowKind,
    overrides: &FlowOverrides,
    body_template: String,
) -> FlowConfig {
    let color = file.label_color.trim_start_matches('#');
    let (prefix, paths, labels, title, commit, body) = match kind {
        FlowKind::Summary => (
            "update-readme",
            vec!["README.md".to_string()],
            "documentation,automated",
            defaults::SUMMARY_PR_TITLE,
            defaults::SUMMARY_COMMIT_MESSAGE,
            defaults::SUMMARY_PR_BODY,
        ),
        FlowKind::ScanResults => (
            "scan-results",
            vec![
                file.results_dir.display().to_string(),
                file.summary_file.display().to_string(),
            ],
            "security,vulnerability-scan,automated",
            defaults::SCAN_PR_TITLE,
            defaults::SCAN_COMMIT_MESSAGE,
            defaults::SCAN_PR_BODY,
        ),
    };

    FlowConfig {
        branch_prefix: overrides
            .branch_prefix
            .clone()
            .unwrap_or_else(|| prefix.to_string()),
        paths: overrides.paths.clone().unwrap_or(paths),
        labels: parse_label_list(
            overrides.labels.as_deref().unwrap_or(labels),
            &file.label_description,
            color,
        ),
        pr_title_format: overrides
            .pr_title_format
            .clone()
            .unwrap_or_else(|| title.to_string()),
        commit_message_format: overrides
            .commit_message_format
            .clone()
            .unwrap_or_else(|| commit.to_string()),
        pr_body_template: if body_template.is_empty() {
            body.to_string()
        } else {
            body_template
        },
    }
}

/// Reads a PR body template relative to the config file's directory.
fn load_body_template(base_dir: &Path, template: Option<&Path>) -> Result<String, ConfigError> {
    let Some(template) = template else {
        return Ok(String::new());
    };

    let path = base_dir.join(template);
    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    if content.trim().is_empty() {
        return Err(ConfigError::EmptyTemplate {
            path: path.display().to_string(),
        });
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("publisher.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_are_usable() {
        let config = PublisherConfig::default();

        assert_eq!(config.base_branch, "main");
        assert_eq!(config.remote, "origin");
        assert_eq!(config.summary.paths, ["README.md"]);
        assert_eq!(config.scan.paths, ["results", "SCAN_RESULTS.md"]);
        assert_eq!(config.scan.branch_prefix, "scan-results");
        assert_eq!(config.scan.labels.len(), 3);
        assert_eq!(config.scan.pr_body_template, defaults::SCAN_PR_BODY);
    }

    #[test]
    fn load_applies_overrides() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("body.md"), "Body for {{branch}}").unwrap();
        let path = write_config(
            &temp,
            r##"
base-branch = "develop"
label-color = "#00ff00"
results-dir = "out"

[scan]
labels = "vuln, bot"
pr-body-template = "body.md"
"##,
        );

        let config = PublisherConfig::load(&path).unwrap();

        assert_eq!(config.base_branch, "develop");
        assert_eq!(config.scan.paths, ["out", "SCAN_RESULTS.md"]);
        assert_eq!(config.scan.pr_body_template, "Body for {{branch}}");
        assert_eq!(config.scan.labels[0].name, "vuln");
        assert_eq!(config.scan.labels[1].color, "00ff00");
        assert_eq!(config.summary.branch_prefix, "update-readme");
    }

    #[test]
    fn load_rejects_bad_label_color() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, r#"label-color = "red""#);

        let result = PublisherConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn load_rejects_invalid_branch_prefix() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
[summary]
branch-prefix = "bad..prefix"
"#,
        );

        let result = PublisherConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, r#"base-brnach = "main""#);

        let result = PublisherConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn load_reports_missing_body_template() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
[summary]
pr-body-template = "missing.md"
"#,
        );

        let result = PublisherConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn load_rejects_blank_body_template() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("blank.md"), "  \n").unwrap();
        let path = write_config(
            &temp,
            r#"
[scan]
pr-body-template = "blank.md"
"#,
        );

        let result = PublisherConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::EmptyTemplate { .. })));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let temp = TempDir::new().unwrap();
        let config = PublisherConfig::load_or_default(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.base_branch, "main");
    }

    #[test]
    fn load_requires_existing_file() {
        let temp = TempDir::new().unwrap();
        let result = PublisherConfig::load(&temp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }
}

//! Merging per-scanner results and regenerating the summary table.
//!
//! Each scanner drops a temporary `<scanner>-violations.json` shaped
//! `{"<scanner>": [finding, ...]}`. Aggregation folds those into the
//! repository's `<org>-<repo>-violations.json`, removes the temporaries, and
//! rebuilds the table from every repository file in the directory.

mod error;
pub mod severity;
mod table;

pub use error::AggregateError;
pub use table::{render_summary_table, SummaryRow, SUMMARY_HEADING};

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};

/// Findings keyed by scanner name.
pub type ScanResults = BTreeMap<String, Vec<Value>>;

const VIOLATIONS_SUFFIX: &str = "-violations.json";

/// Files written by an aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateReport {
    /// The merged per-repository file.
    pub results_file: PathBuf,

    /// The regenerated summary table.
    pub summary_file: PathBuf,

    /// Number of repositories in the table.
    pub repositories: usize,

    /// False when the files were only previewed.
    pub written: bool,
}

/// Name of a repository's merged violations file.
#[must_use]
pub fn violations_file_name(org: &str, repo: &str) -> String {
    format!("{org}-{repo}{VIOLATIONS_SUFFIX}")
}

fn scanner_file_name(scanner: &str) -> String {
    format!("{scanner}{VIOLATIONS_SUFFIX}")
}

/// Merges the repository's existing results with fresh scanner output.
///
/// Scanner files replace that scanner's previous findings.
///
/// # Errors
///
/// Returns [`AggregateError`] if an existing file cannot be read or parsed.
pub fn aggregate_results(
    org: &str,
    repo: &str,
    results_dir: &Path,
    scanners: &[String],
) -> Result<ScanResults, AggregateError> {
    let per_repo = results_dir.join(violations_file_name(org, repo));
    let mut aggregated = if per_repo.exists() {
        read_results(&per_repo)?
    } else {
        ScanResults::new()
    };

    for scanner in scanners {
        let scanner_file = results_dir.join(scanner_file_name(scanner));
        if !scanner_file.exists() {
            continue;
        }
        let fresh = read_results(&scanner_file)?;
        debug!(file = %scanner_file.display(), scanners = fresh.len(), "Merging scanner output");
        aggregated.extend(fresh);
    }

    Ok(aggregated)
}

/// Writes the merged results and deletes the temporary scanner files.
///
/// # Errors
///
/// Returns [`AggregateError`] if the directory or file cannot be written.
pub fn save_aggregated_results(
    org: &str,
    repo: &str,
    results: &ScanResults,
    results_dir: &Path,
    scanners: &[String],
) -> Result<PathBuf, AggregateError> {
    std::fs::create_dir_all(results_dir).map_err(|e| io_error(results_dir, e))?;

    let path = results_dir.join(violations_file_name(org, repo));
    let json = serde_json::to_string_pretty(results).map_err(|e| AggregateError::Json {
        path: path.display().to_string(),
        source: e,
    })?;
    std::fs::write(&path, json).map_err(|e| io_error(&path, e))?;
    info!(file = %path.display(), "Saved results");

    for scanner in scanners {
        let temp = results_dir.join(scanner_file_name(scanner));
        if temp.exists() {
            std::fs::remove_file(&temp).map_err(|e| io_error(&temp, e))?;
            debug!(file = %temp.display(), "Removed temporary scanner file");
        }
    }

    Ok(path)
}

/// Builds one summary row per repository file in `results_dir`.
///
/// Temporary scanner files and names without an `org-repo` split are skipped.
///
/// # Errors
///
/// Returns [`AggregateError`] if the directory or a repository file cannot be read.
pub fn collect_summary_rows(
    results_dir: &Path,
    scanners: &[String],
) -> Result<Vec<SummaryRow>, AggregateError> {
    let temp_names: Vec<String> = scanners.iter().map(|s| scanner_file_name(s)).collect();
    let entries = std::fs::read_dir(results_dir).map_err(|e| io_error(results_dir, e))?;

    let mut rows = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_error(results_dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if temp_names.contains(&file_name) {
            continue;
        }
        let Some(stem) = file_name.strip_suffix(VIOLATIONS_SUFFIX) else {
            continue;
        };
        let Some((org, repo)) = stem.split_once('-').filter(|(o, r)| !o.is_empty() && !r.is_empty())
        else {
            warn!(file = %file_name, "Skipping results file without org-repo name");
            continue;
        };

        let results = read_results(&path)?;
        rows.push(SummaryRow::new(org, repo, &results));
    }

    Ok(rows)
}

/// Runs a full aggregation for `org/repo` and rewrites `summary_file`.
///
/// Result links in the table are relative to the summary file's directory.
/// When the results directory is not below it, links use the directory's
/// own name.
///
/// # Errors
///
/// Returns [`AggregateError`] on invalid names or any file error.
pub fn run_aggregation(
    org: &str,
    repo: &str,
    results_dir: &Path,
    summary_file: &Path,
    scanners: &[String],
) -> Result<AggregateReport, AggregateError> {
    let _span = info_span!("aggregate", org, repo).entered();

    validate_name("organization", org)?;
    validate_name("repository", repo)?;

    let results = aggregate_results(org, repo, results_dir, scanners)?;
    let results_file = save_aggregated_results(org, repo, &results, results_dir, scanners)?;

    let rows = collect_summary_rows(results_dir, scanners)?;
    let repositories = rows.len();
    let summary_dir = summary_file.parent().unwrap_or_else(|| Path::new(""));
    let table = render_summary_table(rows, &results_link_base(results_dir, summary_dir));

    if !summary_dir.as_os_str().is_empty() {
        std::fs::create_dir_all(summary_dir).map_err(|e| io_error(summary_dir, e))?;
    }
    std::fs::write(summary_file, table).map_err(|e| io_error(summary_file, e))?;
    info!(file = %summary_file.display(), repositories, "Generated summary table");

    Ok(AggregateReport {
        results_file,
        summary_file: summary_file.to_path_buf(),
        repositories,
        written: true,
    })
}

/// Renders the table [`run_aggregation`] would write, without touching disk.
///
/// # Errors
///
/// Returns [`AggregateError`] on invalid names or unreadable results.
pub fn preview_aggregation(
    org: &str,
    repo: &str,
    results_dir: &Path,
    summary_file: &Path,
    scanners: &[String],
) -> Result<(AggregateReport, String), AggregateError> {
    validate_name("organization", org)?;
    validate_name("repository", repo)?;

    let results = aggregate_results(org, repo, results_dir, scanners)?;
    let mut rows = if results_dir.is_dir() {
        collect_summary_rows(results_dir, scanners)?
    } else {
        Vec::new()
    };
    let row = SummaryRow::new(org, repo, &results);
    rows.retain(|existing| existing.file_name != row.file_name);
    rows.push(row);

    let report = AggregateReport {
        results_file: results_dir.join(violations_file_name(org, repo)),
        summary_file: summary_file.to_path_buf(),
        repositories: rows.len(),
        written: false,
    };
    let summary_dir = summary_file.parent().unwrap_or_else(|| Path::new(""));
    let table = render_summary_table(rows, &results_link_base(results_dir, summary_dir));
    Ok((report, table))
}

/// Relative path from the summary file's directory to `results_dir`.
fn results_link_base(results_dir: &Path, summary_dir: &Path) -> String {
    match results_dir.strip_prefix(summary_dir) {
        Ok(relative) if relative.is_relative() => relative.display().to_string(),
        _ => results_dir
            .file_name()
            .map_or_else(|| "results".to_string(), |name| name.to_string_lossy().into_owned()),
    }
}

fn read_results(path: &Path) -> Result<ScanResults, AggregateError> {
    let content = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    serde_json::from_str(&content).map_err(|e| AggregateError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

fn validate_name(what: &'static str, value: &str) -> Result<(), AggregateError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && value != "."
        && value != "..";
    if valid {
        Ok(())
    } else {
        Err(AggregateError::InvalidName {
            what,
            value: value.to_string(),
        })
    }
}

fn io_error(path: &Path, source: std::io::Error) -> AggregateError {
    AggregateError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn scanners() -> Vec<String> {
        vec!["grype".to_string(), "trivy".to_string()]
    }

    #[test]
    fn scanner_output_replaces_previous_findings() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("octo-app-violations.json"),
            json!({"trivy": [{"severity": "LOW"}], "semgrep": []}).to_string(),
        )
        .unwrap();
        fs::write(
            temp.path().join("trivy-violations.json"),
            json!({"trivy": [{"severity": "HIGH"}, {"severity": "HIGH"}]}).to_string(),
        )
        .unwrap();

        let results = aggregate_results("octo", "app", temp.path(), &scanners()).unwrap();

        assert_eq!(results["trivy"].len(), 2);
        assert!(results.contains_key("semgrep"));
    }

    #[test]
    fn save_removes_temporary_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("grype-violations.json"), "{}").unwrap();

        let path =
            save_aggregated_results("octo", "app", &ScanResults::new(), temp.path(), &scanners())
                .unwrap();

        assert!(path.exists());
        assert!(!temp.path().join("grype-violations.json").exists());
    }

    #[test]
    fn rejects_malformed_results() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("octo-app-violations.json"), "[1, 2]").unwrap();

        let result = aggregate_results("octo", "app", temp.path(), &scanners());
        assert!(matches!(result, Err(AggregateError::Json { .. })));
    }

    #[test]
    fn rejects_names_with_separators() {
        let temp = TempDir::new().unwrap();
        let result = run_aggregation(
            "octo/evil",
            "app",
            temp.path(),
            &temp.path().join("SCAN_RESULTS.md"),
            &scanners(),
        );
        assert!(matches!(result, Err(AggregateError::InvalidName { .. })));
    }

    #[test]
    fn run_writes_table_with_relative_links() {
        let temp = TempDir::new().unwrap();
        let results_dir = temp.path().join("results");
        fs::create_dir_all(&results_dir).unwrap();
        fs::write(
            results_dir.join("grype-violations.json"),
            json!({"grype": [{"severity": "MEDIUM", "fixed_version": "1.2.3"}]}).to_string(),
        )
        .unwrap();
        let summary_file = temp.path().join("SCAN_RESULTS.md");

        let report =
            run_aggregation("octo", "app", &results_dir, &summary_file, &scanners()).unwrap();

        assert_eq!(report.repositories, 1);
        let table = fs::read_to_string(&summary_file).unwrap();
        assert!(table.starts_with(SUMMARY_HEADING));
        assert!(table.contains("[📋](results/octo-app-violations.json) | 1 | 0 | 0 | 1 | 0 | 1 | grype | 🟡 |"));
    }

    #[test]
    fn preview_leaves_files_untouched() {
        let temp = TempDir::new().unwrap();
        let results_dir = temp.path().join("results");
        fs::create_dir_all(&results_dir).unwrap();
        fs::write(
            results_dir.join("trivy-violations.json"),
            json!({"trivy": [{"severity": "HIGH"}]}).to_string(),
        )
        .unwrap();
        fs::write(results_dir.join("octo-web-violations.json"), "{}").unwrap();
        let summary_file = temp.path().join("SCAN_RESULTS.md");

        let (report, table) =
            preview_aggregation("octo", "app", &results_dir, &summary_file, &scanners()).unwrap();

        assert!(!report.written);
        assert_eq!(report.repositories, 2);
        assert!(table.contains("| [octo/app](https://github.com/octo/app) | [📋](results/octo-app-violations.json) | 1 |"));
        assert!(results_dir.join("trivy-violations.json").exists());
        assert!(!report.results_file.exists());
        assert!(!summary_file.exists());
    }

    #[test]
    fn links_never_leak_absolute_paths() {
        let results_temp = TempDir::new().unwrap();
        let summary_temp = TempDir::new().unwrap();
        let results_dir = results_temp.path().join("results");
        let summary_file = summary_temp.path().join("SCAN_RESULTS.md");

        run_aggregation("octo", "app", &results_dir, &summary_file, &scanners()).unwrap();

        let table = fs::read_to_string(&summary_file).unwrap();
        assert!(table.contains("[📋](results/octo-app-violations.json)"));
        assert!(!table.contains(&results_temp.path().display().to_string()));
    }

    #[test]
    fn link_base_is_relative_to_summary_directory() {
        assert_eq!(
            results_link_base(Path::new("out/results"), Path::new("out")),
            "results"
        );
        assert_eq!(results_link_base(Path::new("results"), Path::new("")), "results");
        assert_eq!(results_link_base(Path::new("/abs/scans"), Path::new("")), "scans");
        assert_eq!(results_link_base(Path::new("docs"), Path::new("docs")), "");
    }

    #[test]
    fn summary_skips_temporary_and_unrelated_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("octo-app-violations.json"), "{}").unwrap();
        fs::write(temp.path().join("trivy-violations.json"), "{}").unwrap();
        fs::write(temp.path().join("notes.txt"), "x").unwrap();
        fs::write(temp.path().join("lonely-violations.json"), "{}").unwrap();

        let rows = collect_summary_rows(temp.path(), &scanners()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].org_repo, "octo/app");
    }
}

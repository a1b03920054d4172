//! Markdown summary table over all per-repository results.

use super::severity::{self, SeverityCounts};
use super::ScanResults;
use serde_json::Value;

/// Title line of the generated summary.
pub const SUMMARY_HEADING: &str = "# Vulnerability Scan Results";

/// One repository's row in the summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// `org/repo`.
    pub org_repo: String,

    /// Name of the violations file.
    pub file_name: String,

    /// Findings across all scanners.
    pub total: usize,

    /// Headline severity counts.
    pub counts: SeverityCounts,

    /// Findings with a fixed version available.
    pub fixable: usize,

    /// Sorted, comma-joined scanner names, or `None`.
    pub scanners: String,

    /// Worst severity across all findings.
    pub worst_severity: String,
}

impl SummaryRow {
    /// Builds the row for `org/repo` from its merged results.
    #[must_use]
    pub fn new(org: &str, repo: &str, results: &ScanResults) -> Self {
        let findings: Vec<&Value> = results.values().flatten().collect();
        let scanners: Vec<&str> = results.keys().map(String::as_str).collect();

        Self {
            org_repo: format!("{org}/{repo}"),
            file_name: format!("{org}-{repo}-violations.json"),
            total: findings.len(),
            counts: SeverityCounts::tally(findings.iter().copied()),
            fixable: findings.iter().filter(|f| severity::is_fixable(f)).count(),
            scanners: if scanners.is_empty() {
                "None".to_string()
            } else {
                scanners.join(", ")
            },
            worst_severity: severity::worst_severity(findings.iter().copied()).to_string(),
        }
    }

    fn priority(&self) -> u32 {
        severity::priority(&self.worst_severity)
    }
}

/// Renders the summary table.
///
/// Rows are ordered cleanest first, then by name. `results_link_base` is the
/// directory the violations links point into; empty means the summary's own
/// directory.
#[must_use]
pub fn render_summary_table(mut rows: Vec<SummaryRow>, results_link_base: &str) -> String {
    rows.sort_by(|a, b| {
        b.priority()
            .cmp(&a.priority())
            .then_with(|| a.org_repo.cmp(&b.org_repo))
    });

    let base = results_link_base.trim_end_matches('/');
    let mut lines = vec![
        SUMMARY_HEADING.to_string(),
        String::new(),
        "| Project | Results | Total | Critical | High | Medium | Low | Fixable | Scanners | Status |"
            .to_string(),
        "|---------|---------|-------|----------|------|--------|-----|---------|----------|--------|"
            .to_string(),
    ];

    for row in &rows {
        let link = if base.is_empty() {
            row.file_name.clone()
        } else {
            format!("{base}/{}", row.file_name)
        };
        lines.push(format!(
            "| [{org_repo}](https://github.com/{org_repo}) | [📋]({link}) | {total} | {critical} | {high} | {medium} | {low} | {fixable} | {scanners} | {status} |",
            org_repo = row.org_repo,
            total = row.total,
            critical = row.counts.critical,
            high = row.counts.high,
            medium = row.counts.medium,
            low = row.counts.low,
            fixable = row.fixable,
            scanners = row.scanners,
            status = severity::emoji(&row.worst_severity),
        ));
    }

    lines.join("\n")
}

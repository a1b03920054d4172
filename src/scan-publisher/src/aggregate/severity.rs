//! Severity ranking for findings.

use serde_json::Value;

/// Priority used for severities outside the known set.
pub const UNRANKED: u32 = 999;

/// Rank of a severity; lower is worse.
#[must_use]
pub fn priority(severity: &str) -> u32 {
    match severity {
        "CRITICAL" => 0,
        "HIGH" => 1,
        "MEDIUM" => 2,
        "LOW" => 3,
        "UNKNOWN" => 4,
        "WARNING" => 5,
        "NONE" => 6,
        _ => UNRANKED,
    }
}

/// Status emoji shown for a repository's worst severity.
#[must_use]
pub fn emoji(severity: &str) -> &'static str {
    match severity {
        "CRITICAL" | "HIGH" => "🔴",
        "MEDIUM" | "LOW" | "UNKNOWN" | "WARNING" => "🟡",
        "NONE" => "🟢",
        _ => "⚪",
    }
}

/// Severity of a finding.
///
/// A missing key reads as `UNKNOWN`. A present key that is not a string
/// (usually `null`) yields `None` and ranks as [`UNRANKED`].
#[must_use]
pub fn finding_severity(finding: &Value) -> Option<&str> {
    match finding.get("severity") {
        None => Some("UNKNOWN"),
        Some(value) => value.as_str(),
    }
}

/// Returns true if the finding names a fixed version.
#[must_use]
pub fn is_fixable(finding: &Value) -> bool {
    match finding.get("fixed_version") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(Value::Bool(true)) => true,
    }
}

/// Worst severity among `findings`; `NONE` when there are none.
///
/// Severities outside the known set never win.
#[must_use]
pub fn worst_severity<'a, I>(findings: I) -> &'a str
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut worst = "NONE";
    for severity in findings.into_iter().filter_map(finding_severity) {
        if priority(severity) < priority(worst) {
            worst = severity;
        }
    }
    worst
}

/// Counts of the four headline severities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    /// Tallies findings by severity.
    pub fn tally<'a, I>(findings: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut counts = Self::default();
        for finding in findings {
            match finding_severity(finding).unwrap_or_default() {
                "CRITICAL" => counts.critical += 1,
                "HIGH" => counts.high += 1,
                "MEDIUM" => counts.medium += 1,
                "LOW" => counts.low += 1,
                _ => {}
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn worst_severity_prefers_lower_priority() {
        let findings = [
            json!({"severity": "LOW"}),
            json!({"severity": "HIGH"}),
            json!({"severity": "MEDIUM"}),
        ];
        assert_eq!(worst_severity(&findings), "HIGH");
    }

    #[test]
    fn missing_severity_counts_as_unknown() {
        let findings = [json!({"id": "CVE-1"})];
        assert_eq!(worst_severity(&findings), "UNKNOWN");
        assert_eq!(emoji("UNKNOWN"), "🟡");
    }

    #[test]
    fn unranked_severity_never_wins() {
        let findings = [json!({"severity": "BOGUS"})];
        assert_eq!(worst_severity(&findings), "NONE");
        assert_eq!(emoji("BOGUS"), "⚪");
    }

    #[test]
    fn null_severity_is_unranked() {
        let findings = [json!({"id": "CVE-1", "severity": null})];
        assert_eq!(finding_severity(&findings[0]), None);
        assert_eq!(worst_severity(&findings), "NONE");
        assert_eq!(SeverityCounts::tally(&findings), SeverityCounts::default());
    }

    #[test]
    fn empty_findings_are_clean() {
        let none: [Value; 0] = [];
        assert_eq!(worst_severity(&none), "NONE");
        assert_eq!(emoji("NONE"), "🟢");
    }

    #[test]
    fn tallies_headline_severities() {
        let findings = [
            json!({"severity": "CRITICAL"}),
            json!({"severity": "CRITICAL"}),
            json!({"severity": "LOW"}),
            json!({"severity": "WARNING"}),
        ];
        let counts = SeverityCounts::tally(&findings);
        assert_eq!(
            counts,
            SeverityCounts {
                critical: 2,
                high: 0,
                medium: 0,
                low: 1
            }
        );
    }

    #[test]
    fn fixable_requires_truthy_fixed_version() {
        assert!(is_fixable(&json!({"fixed_version": "1.2.3"})));
        assert!(!is_fixable(&json!({"fixed_version": ""})));
        assert!(!is_fixable(&json!({"fixed_version": null})));
        assert!(!is_fixable(&json!({})));
    }
}

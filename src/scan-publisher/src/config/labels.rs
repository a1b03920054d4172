//! Label definitions.

use serde::Serialize;

/// A label to create and attach to published PRs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelSpec {
    /// Label name.
    pub name: String,

    /// Description used when the label is created.
    pub description: String,

    /// Hex colour without `#`, used when the label is created.
    pub color: String,
}

/// Parses a comma-separated label list.
///
/// Names are trimmed, blanks dropped, and repeats removed keeping the first
/// occurrence.
#[must_use]
pub fn parse_label_list(list: &str, description: &str, color: &str) -> Vec<LabelSpec> {
    let mut labels: Vec<LabelSpec> = Vec::new();
    for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if labels.iter().any(|label| label.name == name) {
            continue;
        }
        labels.push(LabelSpec {
            name: name.to_string(),
            description: description.to_string(),
            color: color.to_string(),
        });
    }
    labels
}

/// Returns true if `color` is six hex digits.
pub(crate) fn is_hex_color(color: &str) -> bool {
    color.len() == 6 && color.chars().all(|c| c.is_ascii_hexdigit())
}

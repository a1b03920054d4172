//! Built-in templates used when the config does not override them.

/// PR title for the summary flow.
pub const SUMMARY_PR_TITLE: &str = "docs: update vulnerability scan summary";

/// Commit message for the summary flow.
pub const SUMMARY_COMMIT_MESSAGE: &str = r#"docs: update vulnerability scan summary

Triggered by {{event_name}} from @{{actor}} in workflow "{{workflow}}".
{{#if run_url}}Run: {{run_url}}
{{/if}}"#;

/// PR body for the summary flow.
pub const SUMMARY_PR_BODY: &str = r#"## Vulnerability scan summary update

This PR refreshes {{#each paths}}`{{this}}`{{#unless @last}}, {{/unless}}{{/each}} with the latest scan summary.
{{#if (eq event_name "schedule")}}
This update was produced by the scheduled scan.
{{/if}}
### Review checklist

- [ ] The summary table renders correctly
- [ ] Totals match the committed results
- [ ] No repository disappeared unexpectedly

### Run metadata

- Event: `{{event_name}}`
- Triggered by: @{{actor}}
- Workflow: {{workflow}}
{{#if run_url}}- Run: {{run_url}}
{{/if}}- Branch: `{{branch}}`
"#;

/// PR title for the scan-results flow.
pub const SCAN_PR_TITLE: &str = "Scan results: {{target.full_name}}";

/// Commit message for the scan-results flow.
pub const SCAN_COMMIT_MESSAGE: &str = r#"chore: add scan results for {{target.full_name}}

Scanned repository: {{target.url}}
Results file: {{results_file}}
Summary file: {{summary_file}}

Triggered by {{event_name}} from @{{actor}} in workflow "{{workflow}}".
{{#if run_url}}Run: {{run_url}}
{{/if}}"#;

/// PR body for the scan-results flow.
pub const SCAN_PR_BODY: &str = r#"## Vulnerability scan results for [{{target.full_name}}]({{target.url}})

This PR adds the latest findings for `{{target.full_name}}`.

| | |
|---|---|
| Scanned repository | [{{target.full_name}}]({{target.url}}) |
| Results | `{{results_file}}` |
| Summary | `{{summary_file}}` |
{{#if (eq event_name "schedule")}}
This scan was triggered by the schedule.
{{/if}}
### Review checklist

- [ ] Findings look plausible for the scanned repository
- [ ] No credentials or secrets appear in the results
- [ ] The summary table lists the repository

### Run metadata

- Event: `{{event_name}}`
- Triggered by: @{{actor}}
- Workflow: {{workflow}}
{{#if run_url}}- Run: {{run_url}}
{{/if}}- Branch: `{{branch}}`
"#;

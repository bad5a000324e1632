//! Output formatting for `baler check`.
//!
//! This module formats a validation pass for human-readable or JSON output.

use crate::manifest::validation::ValidationReport;
use serde::Serialize;

/// Format a validation outcome for human-readable output.
///
/// # Examples
///
/// ```
/// use baler::manifest::validation::ValidationReport;
/// use baler::report::format_human;
///
/// let output = format_human(&ValidationReport::default());
/// assert!(output.contains("manifest OK"));
/// ```
#[must_use]
pub fn format_human(report: &ValidationReport) -> String {
    if report.is_empty() {
        return String::from("manifest OK");
    }

    let mut output = format!(
        "manifest validation failed with {} violation(s):\n",
        report.violations().len()
    );
    for violation in report.violations() {
        output.push_str(&format!("  {violation}\n"));
    }
    output
}

/// Format a validation outcome as JSON.
///
/// # Examples
///
/// ```
/// use baler::manifest::validation::ValidationReport;
/// use baler::report::format_json;
///
/// let json = format_json(&ValidationReport::default());
/// assert!(json.contains("\"ok\": true"));
/// ```
#[must_use]
pub fn format_json(report: &ValidationReport) -> String {
    let json_data = CheckOutcomeJson {
        ok: report.is_empty(),
        violations: report,
    };

    serde_json::to_string_pretty(&json_data).unwrap_or_else(|_| "{}".to_owned())
}

/// JSON-serializable representation of a validation outcome.
#[derive(Debug, Serialize)]
struct CheckOutcomeJson<'a> {
    /// True when the manifest passed every check.
    ok: bool,
    /// The violations found, empty on success.
    #[serde(flatten)]
    violations: &'a ValidationReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::validation::Violation;

    fn failing_report() -> ValidationReport {
        ValidationReport::from_violations(vec![
            Violation::missing("name"),
            Violation::malformed("version", "must start with a digit"),
        ])
    }

    #[test]
    fn human_output_lists_every_violation() {
        let output = format_human(&failing_report());
        assert!(output.contains("2 violation(s)"));
        assert!(output.contains("name: required field is missing or empty"));
        assert!(output.contains("version: must start with a digit"));
    }

    #[test]
    fn json_output_carries_structured_violations() {
        let json = format_json(&failing_report());
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(parsed["ok"], false);
        assert_eq!(parsed["violations"][0]["field"], "name");
    }

    #[test]
    fn empty_report_is_ok() {
        let json = format_json(&ValidationReport::default());
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(parsed["ok"], true);
        assert_eq!(parsed["violations"].as_array().map(Vec::len), Some(0));
    }
}

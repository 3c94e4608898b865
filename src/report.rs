// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report rendering for scan records.
//!
//! The engine exposes scan results as data; this module renders the
//! two formats the CLI ships: human-readable text and structured JSON.

use crate::record::{ScanRecord, Severity};

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Render a scan record in the requested format
pub fn generate_report(record: &ScanRecord, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(record),
        OutputFormat::Json => {
            serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

fn generate_text_report(record: &ScanRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("=== Accessibility scan: {} ===\n\n", record.url));
    output.push_str(&format!(
        "Checked:  {}\nScore:    {}/100\nLevel:    {}\n",
        record.checked_at.format("%Y-%m-%d %H:%M:%S UTC"),
        record.score,
        record.level
    ));
    output.push_str(&format!(
        "Issues:   {} ({} critical, {} serious, {} moderate, {} minor)\n",
        record.summary.total(),
        record.summary.critical,
        record.summary.serious,
        record.summary.moderate,
        record.summary.minor
    ));
    output.push_str(&format!(
        "Page:     {} images, {} links, {} forms, {} landmarks, {} headings\n\n",
        record.metadata.images,
        record.metadata.links,
        record.metadata.forms,
        record.metadata.landmarks,
        record.metadata.headings
    ));

    if record.issues.is_empty() && record.warnings.is_empty() {
        output.push_str("No accessibility issues found. All applicable checks passed.\n");
        return output;
    }

    for severity in &[
        Severity::Critical,
        Severity::Serious,
        Severity::Moderate,
        Severity::Minor,
    ] {
        let group: Vec<_> = record
            .issues
            .iter()
            .filter(|i| i.severity == *severity)
            .collect();
        if group.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", severity, group.len()));
        for issue in group {
            output.push_str(&format!(
                "[{}] {} (WCAG {}, {} occurrence(s))\n",
                issue.rule_id, issue.name, issue.wcag, issue.count
            ));
            for excerpt in &issue.excerpts {
                output.push_str(&format!("  {}\n", excerpt));
            }
            output.push_str(&format!("  Fix: {}\n\n", issue.help));
        }
    }

    if !record.warnings.is_empty() {
        output.push_str(&format!("--- warnings ({}) ---\n", record.warnings.len()));
        for warning in &record.warnings {
            output.push_str(&format!("[{}] {}\n", warning.rule_id, warning.name));
            output.push_str(&format!("  Fix: {}\n\n", warning.help));
        }
    }

    output.push_str(&format!(
        "{} rule(s) passed.\n",
        record.passes.len()
    ));

    output
}

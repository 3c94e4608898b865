// SPDX-License-Identifier: PMPL-1.0-or-later
//! Scan result records: findings, page metadata, and the immutable
//! `ScanRecord` appended to the scan store after every scan.

use crate::catalog::RuleDefinition;
use crate::rules::Evaluation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How many offending-element excerpts an Issue or Warning retains.
/// The occurrence count always reflects the true total.
pub const MAX_EXCERPTS: usize = 5;

/// Severity of a failed rule, ordered least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Minor => write!(f, "minor"),
            Severity::Moderate => write!(f, "moderate"),
            Severity::Serious => write!(f, "serious"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Overall compliance classification, ordered least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceLevel {
    Compliant,
    NeedsImprovement,
    PartiallyCompliant,
    NonCompliant,
}

impl std::fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplianceLevel::Compliant => write!(f, "compliant"),
            ComplianceLevel::NeedsImprovement => write!(f, "needs-improvement"),
            ComplianceLevel::PartiallyCompliant => write!(f, "partially-compliant"),
            ComplianceLevel::NonCompliant => write!(f, "non-compliant"),
        }
    }
}

/// WCAG conformance level a rule is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    A,
    AA,
    AAA,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// WCAG principle a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Perceivable,
    Operable,
    Understandable,
    Robust,
}

/// A rule whose predicate found at least one violation in a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub rule_id: String,
    pub name: String,
    pub severity: Severity,
    pub wcag: String,
    pub description: String,
    pub help: String,
    /// First few offending element excerpts (capped at [`MAX_EXCERPTS`])
    pub excerpts: Vec<String>,
    /// True total number of violations found
    pub count: usize,
}

impl Issue {
    pub fn from_rule(def: &RuleDefinition, excerpts: Vec<String>) -> Self {
        let count = excerpts.len();
        let mut excerpts = excerpts;
        excerpts.truncate(MAX_EXCERPTS);
        Self {
            rule_id: def.id.to_string(),
            name: def.name.to_string(),
            severity: def.severity,
            wcag: def.wcag.to_string(),
            description: def.description.to_string(),
            help: def.help.to_string(),
            excerpts,
            count,
        }
    }
}

/// A soft finding from an advisory rule, below issue threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    pub rule_id: String,
    pub name: String,
    pub wcag: String,
    pub help: String,
    pub excerpts: Vec<String>,
    pub count: usize,
}

impl Warning {
    pub fn from_rule(def: &RuleDefinition, excerpts: Vec<String>) -> Self {
        let count = excerpts.len();
        let mut excerpts = excerpts;
        excerpts.truncate(MAX_EXCERPTS);
        Self {
            rule_id: def.id.to_string(),
            name: def.name.to_string(),
            wcag: def.wcag.to_string(),
            help: def.help.to_string(),
            excerpts,
            count,
        }
    }
}

/// An applicable rule whose predicate found zero violations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pass {
    pub rule_id: String,
    pub name: String,
}

impl Pass {
    pub fn from_rule(def: &RuleDefinition) -> Self {
        Self {
            rule_id: def.id.to_string(),
            name: def.name.to_string(),
        }
    }
}

/// Page-level facts collected during evaluation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub language: Option<String>,
    pub images: usize,
    pub links: usize,
    pub forms: usize,
    pub landmarks: usize,
    pub headings: usize,
}

/// Issue counts broken down by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveritySummary {
    pub critical: usize,
    pub serious: usize,
    pub moderate: usize,
    pub minor: usize,
}

impl SeveritySummary {
    pub fn tally(issues: &[Issue]) -> Self {
        let mut summary = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Critical => summary.critical += 1,
                Severity::Serious => summary.serious += 1,
                Severity::Moderate => summary.moderate += 1,
                Severity::Minor => summary.minor += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.critical + self.serious + self.moderate + self.minor
    }
}

/// One complete scan of one page. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: Uuid,
    pub url: String,
    pub checked_at: DateTime<Utc>,
    /// 0-100, see [`crate::score::score`]
    pub score: u8,
    pub level: ComplianceLevel,
    pub summary: SeveritySummary,
    pub issues: Vec<Issue>,
    pub warnings: Vec<Warning>,
    pub passes: Vec<Pass>,
    pub metadata: PageMetadata,
}

impl ScanRecord {
    pub fn new(url: impl Into<String>, evaluation: Evaluation) -> Self {
        let Evaluation {
            issues,
            warnings,
            passes,
            metadata,
        } = evaluation;
        let score = crate::score::score(passes.len(), issues.len());
        let level = crate::score::classify(&issues);
        let summary = SeveritySummary::tally(&issues);
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            checked_at: Utc::now(),
            score,
            level,
            summary,
            issues,
            warnings,
            passes,
            metadata,
        }
    }
}

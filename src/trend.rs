// SPDX-License-Identifier: PMPL-1.0-or-later
//! Trend and diff derivations over one hostname's scan history.
//!
//! Both computations are read-only: they take an ordered slice of
//! records and never touch the store.

use crate::record::ScanRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Direction of score movement between the earliest and latest scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Improving => write!(f, "improving"),
            TrendDirection::Declining => write!(f, "declining"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Earliest-to-latest comparison for one hostname
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSummary {
    pub first_score: u8,
    pub last_score: u8,
    pub score_delta: i32,
    pub issue_delta: i64,
    pub direction: TrendDirection,
}

/// One scan condensed for charting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    pub checked_at: DateTime<Utc>,
    pub score: u8,
    pub issues: usize,
}

/// Trend output: the per-scan points plus a summary once two or more
/// records exist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    pub scans: Vec<DataPoint>,
    pub trend: Option<TrendSummary>,
}

/// Rule-id set difference between two consecutive scans
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanDiff {
    pub earlier: Uuid,
    pub later: Uuid,
    pub checked_at: DateTime<Utc>,
    /// Rules issued in the earlier scan but clean in the later
    pub fixed: Vec<String>,
    /// Rules clean in the earlier scan but issued in the later
    pub introduced: Vec<String>,
}

/// Summarize score movement across an oldest-first history. None when
/// fewer than two records exist.
pub fn trend_summary(history: &[ScanRecord]) -> Option<TrendSummary> {
    let (first, last) = match (history.first(), history.last()) {
        (Some(first), Some(last)) if history.len() >= 2 => (first, last),
        _ => return None,
    };

    let score_delta = last.score as i32 - first.score as i32;
    let direction = match score_delta {
        delta if delta > 0 => TrendDirection::Improving,
        delta if delta < 0 => TrendDirection::Declining,
        _ => TrendDirection::Stable,
    };

    Some(TrendSummary {
        first_score: first.score,
        last_score: last.score,
        score_delta,
        issue_delta: last.issues.len() as i64 - first.issues.len() as i64,
        direction,
    })
}

/// Condense an oldest-first history into chart points
pub fn data_points(history: &[ScanRecord]) -> Vec<DataPoint> {
    history
        .iter()
        .map(|record| DataPoint {
            checked_at: record.checked_at,
            score: record.score,
            issues: record.issues.len(),
        })
        .collect()
}

/// Diff each consecutive pair of an oldest-first history by issue rule
/// identifiers. Occurrence-count changes within the same rule are not
/// reported.
pub fn diff_history(history: &[ScanRecord]) -> Vec<ScanDiff> {
    history
        .windows(2)
        .map(|pair| {
            let earlier_rules: BTreeSet<&str> =
                pair[0].issues.iter().map(|i| i.rule_id.as_str()).collect();
            let later_rules: BTreeSet<&str> =
                pair[1].issues.iter().map(|i| i.rule_id.as_str()).collect();

            ScanDiff {
                earlier: pair[0].id,
                later: pair[1].id,
                checked_at: pair[1].checked_at,
                fixed: earlier_rules
                    .difference(&later_rules)
                    .map(|id| id.to_string())
                    .collect(),
                introduced: later_rules
                    .difference(&earlier_rules)
                    .map(|id| id.to_string())
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::record::Issue;
    use crate::rules::Evaluation;

    fn record_with_issues(url: &str, rule_ids: &[&str]) -> ScanRecord {
        let issues = rule_ids
            .iter()
            .map(|id| {
                Issue::from_rule(
                    catalog::definition(id).expect("catalogued rule"),
                    vec!["<x>".to_string()],
                )
            })
            .collect();
        ScanRecord::new(
            url,
            Evaluation {
                issues,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_trend_requires_two_records() {
        assert!(trend_summary(&[]).is_none());
        assert!(trend_summary(&[record_with_issues("https://a.example", &[])]).is_none());
    }

    #[test]
    fn test_trend_direction_from_score_delta() {
        let mut improving = record_with_issues("https://a.example", &["html-lang"]);
        improving.score = 40;
        let mut later = record_with_issues("https://a.example", &[]);
        later.score = 90;

        let summary = trend_summary(&[improving.clone(), later.clone()]).unwrap();
        assert_eq!(summary.direction, TrendDirection::Improving);
        assert_eq!(summary.score_delta, 50);
        assert_eq!(summary.issue_delta, -1);

        let summary = trend_summary(&[later, improving]).unwrap();
        assert_eq!(summary.direction, TrendDirection::Declining);
    }

    #[test]
    fn test_trend_stable_on_equal_scores() {
        let mut a = record_with_issues("https://a.example", &[]);
        a.score = 80;
        let mut b = record_with_issues("https://a.example", &[]);
        b.score = 80;
        let summary = trend_summary(&[a, b]).unwrap();
        assert_eq!(summary.direction, TrendDirection::Stable);
        assert_eq!(summary.score_delta, 0);
    }

    #[test]
    fn test_diff_identical_issue_sets_is_empty() {
        let a = record_with_issues("https://a.example", &["img-alt", "html-lang"]);
        let b = record_with_issues("https://a.example", &["html-lang", "img-alt"]);
        let diffs = diff_history(&[a, b]);
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0].fixed.is_empty());
        assert!(diffs[0].introduced.is_empty());
    }

    #[test]
    fn test_diff_fixed_and_introduced() {
        let a = record_with_issues("https://a.example", &["img-alt", "html-lang"]);
        let b = record_with_issues("https://a.example", &["html-lang", "document-title"]);
        let diffs = diff_history(&[a, b]);
        assert_eq!(diffs[0].fixed, vec!["img-alt".to_string()]);
        assert_eq!(diffs[0].introduced, vec!["document-title".to_string()]);
    }

    #[test]
    fn test_diff_pairs_consecutively() {
        let a = record_with_issues("https://a.example", &["img-alt"]);
        let b = record_with_issues("https://a.example", &[]);
        let c = record_with_issues("https://a.example", &["html-lang"]);
        let diffs = diff_history(&[a, b, c]);
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].fixed, vec!["img-alt".to_string()]);
        assert_eq!(diffs[1].introduced, vec!["html-lang".to_string()]);
    }

    #[test]
    fn test_data_points_preserve_order() {
        let a = record_with_issues("https://a.example", &["img-alt"]);
        let b = record_with_issues("https://a.example", &[]);
        let points = data_points(&[a.clone(), b]);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].issues, 1);
        assert_eq!(points[1].issues, 0);
    }
}

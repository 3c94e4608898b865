// SPDX-License-Identifier: PMPL-1.0-or-later
//! Scoring and compliance classification.

use crate::record::{ComplianceLevel, Issue, Severity};

/// Score a scan from the counts of passed and issued rules.
///
/// `round(100 * passed / (passed + issued))`. When no rule was applicable
/// the score is 0 by policy, not a division error.
pub fn score(passed: usize, issued: usize) -> u8 {
    let applicable = passed + issued;
    if applicable == 0 {
        return 0;
    }
    (100.0 * passed as f64 / applicable as f64).round() as u8
}

/// Classify a scan from its issue severity multiset.
///
/// Ordinal escalation, most severe wins: any critical issue is
/// non-compliant; more than one serious issue is partially-compliant; any
/// remaining issue is needs-improvement; a clean scan is compliant. A
/// single serious issue therefore classifies as needs-improvement.
pub fn classify(issues: &[Issue]) -> ComplianceLevel {
    let critical = issues
        .iter()
        .filter(|i| i.severity == Severity::Critical)
        .count();
    let serious = issues
        .iter()
        .filter(|i| i.severity == Severity::Serious)
        .count();

    if critical > 0 {
        ComplianceLevel::NonCompliant
    } else if serious > 1 {
        ComplianceLevel::PartiallyCompliant
    } else if !issues.is_empty() {
        ComplianceLevel::NeedsImprovement
    } else {
        ComplianceLevel::Compliant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn issue(id: &str) -> Issue {
        Issue::from_rule(
            catalog::definition(id).expect("catalogued rule"),
            vec!["<x>".to_string()],
        )
    }

    #[test]
    fn test_score_formula() {
        assert_eq!(score(0, 0), 0);
        assert_eq!(score(10, 0), 100);
        assert_eq!(score(0, 10), 0);
        assert_eq!(score(1, 1), 50);
        assert_eq!(score(2, 1), 67); // 66.67 rounds up
        assert_eq!(score(1, 2), 33); // 33.33 rounds down
    }

    #[test]
    fn test_score_bounds() {
        for passed in 0..30 {
            for issued in 0..30 {
                let s = score(passed, issued);
                assert!(s <= 100);
            }
        }
    }

    #[test]
    fn test_classify_clean() {
        assert_eq!(classify(&[]), ComplianceLevel::Compliant);
    }

    #[test]
    fn test_classify_single_serious_is_needs_improvement() {
        assert_eq!(
            classify(&[issue("html-lang")]),
            ComplianceLevel::NeedsImprovement
        );
    }

    #[test]
    fn test_classify_two_serious_is_partially_compliant() {
        assert_eq!(
            classify(&[issue("html-lang"), issue("document-title")]),
            ComplianceLevel::PartiallyCompliant
        );
    }

    #[test]
    fn test_classify_any_critical_is_non_compliant() {
        assert_eq!(classify(&[issue("img-alt")]), ComplianceLevel::NonCompliant);
        // Critical wins regardless of what else is present
        assert_eq!(
            classify(&[issue("generic-link-text"), issue("img-alt")]),
            ComplianceLevel::NonCompliant
        );
    }

    #[test]
    fn test_classify_minor_only_is_needs_improvement() {
        assert_eq!(
            classify(&[issue("generic-link-text")]),
            ComplianceLevel::NeedsImprovement
        );
    }

    #[test]
    fn test_classify_monotone_under_added_critical() {
        // Adding a critical issue never lowers the classification
        let bases: Vec<Vec<Issue>> = vec![
            vec![],
            vec![issue("generic-link-text")],
            vec![issue("html-lang")],
            vec![issue("html-lang"), issue("document-title")],
            vec![issue("img-alt")],
        ];
        for base in bases {
            let before = classify(&base);
            let mut extended = base;
            extended.push(issue("img-alt"));
            assert!(classify(&extended) >= before);
        }
    }

    #[test]
    fn test_classify_order_independent() {
        let mut issues = vec![issue("html-lang"), issue("img-alt"), issue("heading-order")];
        let forward = classify(&issues);
        issues.reverse();
        assert_eq!(classify(&issues), forward);
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
//! Semantic predicates: landmark regions and data-table headers.

use super::{excerpt, selector, Verdict};
use scraper::Html;

/// Data cells beyond which a table is treated as a data table
const DATA_TABLE_CELL_THRESHOLD: usize = 4;

/// Landmark regions counted by semantic tag or equivalent ARIA role
pub(crate) fn landmark_count(document: &Html) -> usize {
    let tags = document
        .select(&selector("main, nav, header, footer"))
        .count();
    let roles = document
        .select(&selector(
            "[role=\"main\"], [role=\"navigation\"], [role=\"banner\"], [role=\"contentinfo\"]",
        ))
        .count();
    tags + roles
}

/// The page must expose at least one landmark region.
pub fn landmark_regions(document: &Html) -> Verdict {
    if landmark_count(document) > 0 {
        Verdict::Clean
    } else {
        Verdict::Flagged(vec![
            "no main, nav, header, or footer landmarks found".to_string(),
        ])
    }
}

/// Data tables (more than four data cells) must have header cells.
/// Layout-sized tables are left alone; pages without data tables are
/// inapplicable.
pub fn table_headers(document: &Html) -> Verdict {
    let td_sel = selector("td");
    let th_sel = selector("th");

    let data_tables: Vec<_> = document
        .select(&selector("table"))
        .filter(|table| table.select(&td_sel).count() > DATA_TABLE_CELL_THRESHOLD)
        .collect();

    if data_tables.is_empty() {
        return Verdict::Inapplicable;
    }

    let violations = data_tables
        .iter()
        .filter(|table| table.select(&th_sel).next().is_none())
        .map(|table| excerpt(*table))
        .collect();
    Verdict::from_violations(violations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str, predicate: fn(&Html) -> Verdict) -> Verdict {
        predicate(&Html::parse_document(html))
    }

    #[test]
    fn test_landmarks_by_tag() {
        assert_eq!(
            check(
                "<html><body><main><p>content</p></main></body></html>",
                landmark_regions
            ),
            Verdict::Clean
        );
    }

    #[test]
    fn test_landmarks_by_role() {
        assert_eq!(
            check(
                r#"<html><body><div role="navigation">links</div></body></html>"#,
                landmark_regions
            ),
            Verdict::Clean
        );
    }

    #[test]
    fn test_landmarks_absent() {
        assert!(matches!(
            check(
                r#"<html><body><div class="page">content</div></body></html>"#,
                landmark_regions
            ),
            Verdict::Flagged(_)
        ));
    }

    #[test]
    fn test_data_table_without_headers() {
        let html = r#"<html><body><table>
            <tr><td>1</td><td>2</td><td>3</td></tr>
            <tr><td>4</td><td>5</td><td>6</td></tr>
        </table></body></html>"#;
        assert!(matches!(check(html, table_headers), Verdict::Flagged(_)));
    }

    #[test]
    fn test_data_table_with_headers() {
        let html = r#"<html><body><table>
            <tr><th>A</th><th>B</th><th>C</th></tr>
            <tr><td>1</td><td>2</td><td>3</td></tr>
            <tr><td>4</td><td>5</td><td>6</td></tr>
        </table></body></html>"#;
        assert_eq!(check(html, table_headers), Verdict::Clean);
    }

    #[test]
    fn test_small_table_is_layout() {
        // Four cells or fewer is treated as layout, not data
        let html = r#"<html><body><table>
            <tr><td>1</td><td>2</td></tr>
            <tr><td>3</td><td>4</td></tr>
        </table></body></html>"#;
        assert_eq!(check(html, table_headers), Verdict::Inapplicable);
    }

    #[test]
    fn test_no_tables_inapplicable() {
        assert_eq!(
            check("<html><body><p>text</p></body></html>", table_headers),
            Verdict::Inapplicable
        );
    }
}

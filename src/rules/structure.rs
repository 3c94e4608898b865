// SPDX-License-Identifier: PMPL-1.0-or-later
//! Structural predicates: page language, document title, and the
//! heading outline.

use super::{excerpt, selector, Verdict};
use scraper::{ElementRef, Html};

/// The root element must declare a non-blank language.
pub fn html_lang(document: &Html) -> Verdict {
    let Some(root) = document.select(&selector("html")).next() else {
        return Verdict::Flagged(vec!["no <html> element found".to_string()]);
    };

    match root.value().attr("lang") {
        Some(lang) if !lang.trim().is_empty() => Verdict::Clean,
        _ => Verdict::Flagged(vec![excerpt(root)]),
    }
}

/// The document must have a non-empty title.
pub fn document_title(document: &Html) -> Verdict {
    let titled = document
        .select(&selector("title"))
        .any(|title| title.text().any(|chunk| !chunk.trim().is_empty()));
    if titled {
        Verdict::Clean
    } else {
        Verdict::Flagged(vec!["no non-empty <title> element found".to_string()])
    }
}

/// The page must contain at least one heading.
pub fn heading_presence(document: &Html) -> Verdict {
    if document
        .select(&selector("h1, h2, h3, h4, h5, h6"))
        .next()
        .is_some()
    {
        Verdict::Clean
    } else {
        Verdict::Flagged(vec!["no heading elements found".to_string()])
    }
}

/// No heading may exceed the immediately preceding heading's level by
/// more than one. Only evaluated when the page has headings at all.
pub fn heading_order(document: &Html) -> Verdict {
    let headings = collect_headings(document);
    if headings.is_empty() {
        return Verdict::Inapplicable;
    }

    let violations = headings
        .windows(2)
        .filter(|pair| pair[1].0 > pair[0].0 + 1)
        .map(|pair| excerpt(pair[1].1))
        .collect();
    Verdict::from_violations(violations)
}

/// Advisory: the heading outline should open with an h1.
pub fn first_heading_h1(document: &Html) -> Verdict {
    let headings = collect_headings(document);
    match headings.first() {
        None => Verdict::Inapplicable,
        Some((1, _)) => Verdict::Clean,
        Some((_, element)) => Verdict::Flagged(vec![excerpt(*element)]),
    }
}

/// Headings in document order with their numeric levels
fn collect_headings(document: &Html) -> Vec<(u8, ElementRef<'_>)> {
    document
        .select(&selector("h1, h2, h3, h4, h5, h6"))
        .filter_map(|el| {
            el.value()
                .name()
                .strip_prefix('h')
                .and_then(|n| n.parse::<u8>().ok())
                .map(|level| (level, el))
        })
        .collect()
}

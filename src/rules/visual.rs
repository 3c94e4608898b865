// SPDX-License-Identifier: PMPL-1.0-or-later
//! Visual and content predicates: inline-style contrast, viewport meta,
//! auto-refresh, autoplaying media, and generic link text.

use super::{excerpt, selector, Verdict};
use crate::contrast::{contrast_ratio, parse_color, AA_NORMAL_TEXT};
use regex::Regex;
use scraper::Html;

/// Link phrases that say nothing about the destination
const GENERIC_LINK_PHRASES: &[&str] = &[
    "click here",
    "here",
    "read more",
    "more",
    "learn more",
    "link",
    "this",
];

/// Elements whose inline style sets both a foreground and a background
/// color must meet the 4.5:1 AA ratio. Inapplicable when no element
/// carries both; unparseable color expressions are skipped, not guessed.
pub fn color_contrast(document: &Html) -> Verdict {
    let fg_re = Regex::new(r"(?i)(?:^|;)\s*color\s*:\s*([^;]+)").expect("valid regex");
    let bg_re = Regex::new(r"(?i)background(?:-color)?\s*:\s*([^;]+)").expect("valid regex");

    let mut candidates = 0;
    let mut violations = Vec::new();

    for el in document.select(&selector("[style]")) {
        let style = el.value().attr("style").unwrap_or("");
        let fg = fg_re
            .captures(style)
            .and_then(|caps| parse_color(caps[1].trim()));
        let bg = bg_re
            .captures(style)
            .and_then(|caps| parse_color(caps[1].trim()));

        if let (Some(fg), Some(bg)) = (fg, bg) {
            candidates += 1;
            let ratio = contrast_ratio(fg, bg);
            if ratio < AA_NORMAL_TEXT {
                violations.push(format!("{} (contrast {:.2}:1)", excerpt(el), ratio));
            }
        }
    }

    if candidates == 0 {
        return Verdict::Inapplicable;
    }
    Verdict::from_violations(violations)
}

/// The page must carry a viewport meta tag so content reflows on small
/// screens.
pub fn viewport_meta(document: &Html) -> Verdict {
    if document
        .select(&selector("meta[name=\"viewport\"]"))
        .next()
        .is_some()
    {
        Verdict::Clean
    } else {
        Verdict::Flagged(vec!["no viewport meta tag found".to_string()])
    }
}

/// Meta refresh reloads or redirects on a timer users cannot control.
pub fn meta_refresh(document: &Html) -> Verdict {
    let violations = document
        .select(&selector("meta[http-equiv]"))
        .filter(|meta| {
            meta.value()
                .attr("http-equiv")
                .map(|v| v.trim().eq_ignore_ascii_case("refresh"))
                .unwrap_or(false)
        })
        .map(excerpt)
        .collect();
    Verdict::from_violations(violations)
}

/// Media must not autoplay with sound.
pub fn autoplay_media(document: &Html) -> Verdict {
    let violations = document
        .select(&selector("video[autoplay], audio[autoplay]"))
        .filter(|media| media.value().attr("muted").is_none())
        .map(excerpt)
        .collect();
    Verdict::from_violations(violations)
}

/// Link text must not exact-match a generic phrase.
pub fn generic_link_text(document: &Html) -> Verdict {
    let violations = document
        .select(&selector("a[href]"))
        .filter(|link| {
            let text = link
                .text()
                .collect::<String>()
                .trim()
                .to_lowercase();
            GENERIC_LINK_PHRASES.contains(&text.as_str())
        })
        .map(excerpt)
        .collect();
    Verdict::from_violations(violations)
}

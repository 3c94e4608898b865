// SPDX-License-Identifier: PMPL-1.0-or-later
//! Keyboard and focus predicates: tab order, traps, focus visibility,
//! click-only handlers, and the skip-link heuristic.

use super::{excerpt, selector, Verdict};
use regex::Regex;
use scraper::{ElementRef, Html};

/// Tags that are natively keyboard-interactive
const INTERACTIVE_TAGS: &[&str] = &[
    "a", "button", "input", "select", "textarea", "area", "summary", "details",
];

/// Roles that make an element interactive for keyboard purposes
const INTERACTIVE_ROLES: &[&str] = &[
    "button", "link", "checkbox", "radio", "menuitem", "tab", "switch", "option",
];

/// No element may use a positive tabindex.
pub fn positive_tabindex(document: &Html) -> Verdict {
    let violations = document
        .select(&selector("[tabindex]"))
        .filter(|el| {
            el.value()
                .attr("tabindex")
                .and_then(|v| v.trim().parse::<i32>().ok())
                .map(|v| v > 0)
                .unwrap_or(false)
        })
        .map(excerpt)
        .collect();
    Verdict::from_violations(violations)
}

/// A key handler that suppresses default behavior without handling Tab
/// or Escape risks trapping keyboard focus.
pub fn keyboard_trap(document: &Html) -> Verdict {
    let violations = document
        .select(&selector("[onkeydown], [onkeypress]"))
        .filter(|el| {
            let handler = format!(
                "{} {}",
                el.value().attr("onkeydown").unwrap_or(""),
                el.value().attr("onkeypress").unwrap_or("")
            )
            .to_lowercase();
            let suppresses =
                handler.contains("preventdefault") || handler.contains("return false");
            suppresses && !handler.contains("tab") && !handler.contains("escape")
        })
        .map(excerpt)
        .collect();
    Verdict::from_violations(violations)
}

/// Focus styles must not remove the outline without a visible
/// replacement. Checks `:focus` blocks in `<style>` elements and inline
/// style attributes.
pub fn focus_visible(document: &Html) -> Verdict {
    let outline_none_re = Regex::new(r"(?i)outline\s*:\s*(?:none|0)(?:\s|;|$)").expect("valid regex");
    let replacement_re =
        Regex::new(r"(?i)box-shadow|border\s*:|outline-offset").expect("valid regex");
    let block_re = Regex::new(r"([^{}]+)\{([^}]*)\}").expect("valid regex");

    let mut violations = Vec::new();

    for style in document.select(&selector("style")) {
        let css: String = style.text().collect();
        for caps in block_re.captures_iter(&css) {
            let block_selector = caps[1].trim().to_string();
            let declarations = &caps[2];
            if block_selector.contains(":focus")
                && outline_none_re.is_match(declarations)
                && !replacement_re.is_match(declarations)
            {
                violations.push(block_selector);
            }
        }
    }

    for el in document.select(&selector("[style]")) {
        let inline = el.value().attr("style").unwrap_or("");
        if outline_none_re.is_match(inline) && !replacement_re.is_match(inline) {
            violations.push(excerpt(el));
        }
    }

    Verdict::from_violations(violations)
}

/// Click handlers on non-interactive elements need a keyboard path:
/// a tabindex making the element focusable plus a key handler.
pub fn keyboard_access(document: &Html) -> Verdict {
    let violations = document
        .select(&selector("[onclick]"))
        .filter(|el| !is_interactive(*el) && !has_keyboard_path(*el))
        .map(excerpt)
        .collect();
    Verdict::from_violations(violations)
}

fn is_interactive(element: ElementRef<'_>) -> bool {
    if INTERACTIVE_TAGS.contains(&element.value().name()) {
        return true;
    }
    element
        .value()
        .attr("role")
        .map(|role| INTERACTIVE_ROLES.contains(&role.trim().to_lowercase().as_str()))
        .unwrap_or(false)
}

fn has_keyboard_path(element: ElementRef<'_>) -> bool {
    let focusable = element
        .value()
        .attr("tabindex")
        .and_then(|v| v.trim().parse::<i32>().ok())
        .map(|v| v >= 0)
        .unwrap_or(false);
    let handles_keys = element.value().attr("onkeydown").is_some()
        || element.value().attr("onkeypress").is_some()
        || element.value().attr("onkeyup").is_some();
    focusable && handles_keys
}

/// Advisory: pages with navigation should let keyboard users skip it.
/// Looks for a fragment link or "skip" wording among the first three
/// links. Inapplicable without a `<nav>`.
pub fn skip_link(document: &Html) -> Verdict {
    if document.select(&selector("nav")).next().is_none() {
        return Verdict::Inapplicable;
    }

    let has_skip = document
        .select(&selector("a[href]"))
        .take(3)
        .any(|link| {
            let href = link.value().attr("href").unwrap_or("");
            let text: String = link.text().collect::<String>().to_lowercase();
            href.starts_with('#') || text.contains("skip")
        });

    if has_skip {
        Verdict::Clean
    } else {
        Verdict::Flagged(vec![
            "no skip link among the first links on the page".to_string(),
        ])
    }
}

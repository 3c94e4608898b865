// SPDX-License-Identifier: PMPL-1.0-or-later
//! The rule evaluator.
//!
//! Parses markup once and runs every catalogued predicate over the
//! document. Predicates are independent pure functions from the parsed
//! document to a verdict; no predicate reads another's outcome or
//! mutates shared state, so evaluation order never affects the result
//! set. Malformed markup degrades gracefully: selectors simply match
//! nothing.

pub mod keyboard;
pub mod names;
pub mod semantic;
pub mod structure;
pub mod visual;

use crate::catalog::{definition, RuleDefinition};
use crate::record::{Issue, PageMetadata, Pass, Warning};
use scraper::{ElementRef, Html, Selector};

/// Outcome of one rule's predicate over one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The rule had nothing to check (e.g. no data tables present)
    Inapplicable,
    /// The rule applied and found zero violations
    Clean,
    /// Violating element excerpts, in document order
    Flagged(Vec<String>),
}

impl Verdict {
    /// Clean when no violations were collected, Flagged otherwise
    pub fn from_violations(violations: Vec<String>) -> Self {
        if violations.is_empty() {
            Verdict::Clean
        } else {
            Verdict::Flagged(violations)
        }
    }
}

/// One catalogued rule bound to its predicate
pub struct Rule {
    pub def: &'static RuleDefinition,
    pub check: fn(&Html) -> Verdict,
}

/// The full predicate registry, one entry per catalogue rule
pub fn registry() -> Vec<Rule> {
    fn rule(id: &str, check: fn(&Html) -> Verdict) -> Rule {
        Rule {
            def: definition(id).expect("catalogued rule"),
            check,
        }
    }

    vec![
        rule("img-alt", names::img_alt),
        rule("input-label", names::input_label),
        rule("button-name", names::button_name),
        rule("link-name", names::link_name),
        rule("iframe-title", names::iframe_title),
        rule("html-lang", structure::html_lang),
        rule("document-title", structure::document_title),
        rule("heading-presence", structure::heading_presence),
        rule("heading-order", structure::heading_order),
        rule("first-heading-h1", structure::first_heading_h1),
        rule("landmark-regions", semantic::landmark_regions),
        rule("table-headers", semantic::table_headers),
        rule("color-contrast", visual::color_contrast),
        rule("viewport-meta", visual::viewport_meta),
        rule("meta-refresh", visual::meta_refresh),
        rule("autoplay-media", visual::autoplay_media),
        rule("generic-link-text", visual::generic_link_text),
        rule("positive-tabindex", keyboard::positive_tabindex),
        rule("keyboard-trap", keyboard::keyboard_trap),
        rule("focus-visible", keyboard::focus_visible),
        rule("keyboard-access", keyboard::keyboard_access),
        rule("skip-link", keyboard::skip_link),
    ]
}

/// Result of evaluating one page against the whole catalogue
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub issues: Vec<Issue>,
    pub warnings: Vec<Warning>,
    pub passes: Vec<Pass>,
    pub metadata: PageMetadata,
}

/// Evaluate markup against every catalogued rule.
///
/// A given rule yields at most one of issue, warning, or pass per scan;
/// inapplicable rules yield nothing.
pub fn evaluate(markup: &str) -> Evaluation {
    let document = Html::parse_document(markup);
    let mut evaluation = Evaluation {
        metadata: collect_metadata(&document),
        ..Default::default()
    };

    for rule in registry() {
        match (rule.check)(&document) {
            Verdict::Inapplicable => {}
            Verdict::Clean => evaluation.passes.push(Pass::from_rule(rule.def)),
            Verdict::Flagged(excerpts) => {
                if rule.def.advisory {
                    evaluation
                        .warnings
                        .push(Warning::from_rule(rule.def, excerpts));
                } else {
                    evaluation.issues.push(Issue::from_rule(rule.def, excerpts));
                }
            }
        }
    }

    evaluation
}

/// Parse a selector that is known valid at compile time
pub(crate) fn selector(selectors: &str) -> Selector {
    Selector::parse(selectors).expect("valid selector")
}

const EXCERPT_MAX_CHARS: usize = 120;

/// Short opening-tag excerpt of an element for finding reports
pub(crate) fn excerpt(element: ElementRef<'_>) -> String {
    let value = element.value();
    let mut out = format!("<{}", value.name());
    for (name, attr_value) in value.attrs() {
        out.push_str(&format!(" {}=\"{}\"", name, attr_value));
    }
    out.push('>');

    if out.chars().count() > EXCERPT_MAX_CHARS {
        out = out.chars().take(EXCERPT_MAX_CHARS - 3).collect();
        out.push_str("...");
    }
    out
}

/// Attribute present with non-blank content
pub(crate) fn attr_nonempty(element: ElementRef<'_>, name: &str) -> bool {
    element
        .value()
        .attr(name)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false)
}

fn collect_metadata(document: &Html) -> PageMetadata {
    let title = document
        .select(&selector("title"))
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty());

    let language = document
        .select(&selector("html"))
        .next()
        .and_then(|el| el.value().attr("lang"))
        .map(|lang| lang.trim().to_string())
        .filter(|lang| !lang.is_empty());

    PageMetadata {
        title,
        language,
        images: document.select(&selector("img")).count(),
        links: document.select(&selector("a[href]")).count(),
        forms: document.select(&selector("form")).count(),
        landmarks: semantic::landmark_count(document),
        headings: document
            .select(&selector("h1, h2, h3, h4, h5, h6"))
            .count(),
    }
}

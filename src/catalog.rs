// SPDX-License-Identifier: PMPL-1.0-or-later
//! The rule catalogue: a fixed, addressable table of accessibility rule
//! definitions. Read-only at evaluation time. Rule ids are stable and
//! shared by issues, passes, trend diffs, and report consumers.
//!
//! Extending the catalogue means adding one entry here and one predicate
//! in [`crate::rules`]; nothing else changes.

use crate::record::{Category, Severity, WcagLevel};
use serde::Serialize;

/// Immutable definition of one accessibility rule
#[derive(Debug, Clone, Serialize)]
pub struct RuleDefinition {
    /// Stable identifier, e.g. `img-alt`
    pub id: &'static str,
    pub name: &'static str,
    /// WCAG success criterion, e.g. `1.1.1`
    pub wcag: &'static str,
    pub level: WcagLevel,
    pub category: Category,
    pub severity: Severity,
    pub description: &'static str,
    /// Fix guidance shown in reports
    pub help: &'static str,
    pub help_url: &'static str,
    /// Advisory rules surface as warnings rather than issues
    pub advisory: bool,
}

const CATALOG: &[RuleDefinition] = &[
    RuleDefinition {
        id: "img-alt",
        name: "Images must have alternate text",
        wcag: "1.1.1",
        level: WcagLevel::A,
        category: Category::Perceivable,
        severity: Severity::Critical,
        description: "One or more <img> elements have no alt attribute, so screen readers cannot describe them.",
        help: "Add alt=\"description\" for informative images or alt=\"\" for decorative images.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/non-text-content.html",
        advisory: false,
    },
    RuleDefinition {
        id: "input-label",
        name: "Form controls must have labels",
        wcag: "3.3.2",
        level: WcagLevel::A,
        category: Category::Understandable,
        severity: Severity::Critical,
        description: "One or more form controls have no associated label, so their purpose is not announced.",
        help: "Associate a <label for=\"id\">, wrap the control in a <label>, or add aria-label.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/labels-or-instructions.html",
        advisory: false,
    },
    RuleDefinition {
        id: "button-name",
        name: "Buttons must have an accessible name",
        wcag: "4.1.2",
        level: WcagLevel::A,
        category: Category::Robust,
        severity: Severity::Critical,
        description: "One or more buttons have no text content, label, or title, so they are announced as just \"button\".",
        help: "Give the button visible text, a value attribute, or an aria-label.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/name-role-value.html",
        advisory: false,
    },
    RuleDefinition {
        id: "link-name",
        name: "Links must have an accessible name",
        wcag: "2.4.4",
        level: WcagLevel::A,
        category: Category::Operable,
        severity: Severity::Serious,
        description: "One or more links have no text content, labelled image, or title, so their target is unknown.",
        help: "Give the link visible text, or an aria-label describing its destination.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/link-purpose-in-context.html",
        advisory: false,
    },
    RuleDefinition {
        id: "iframe-title",
        name: "Frames must have a title",
        wcag: "4.1.2",
        level: WcagLevel::A,
        category: Category::Robust,
        severity: Severity::Serious,
        description: "One or more <iframe> elements have no title attribute describing their content.",
        help: "Add a title attribute to every <iframe>, e.g. title=\"Embedded map\".",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/name-role-value.html",
        advisory: false,
    },
    RuleDefinition {
        id: "html-lang",
        name: "Page must declare its language",
        wcag: "3.1.1",
        level: WcagLevel::A,
        category: Category::Understandable,
        severity: Severity::Serious,
        description: "The <html> element has no lang attribute, so screen readers cannot pick a pronunciation.",
        help: "Add lang=\"en\" (or the appropriate language code) to the <html> element.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/language-of-page.html",
        advisory: false,
    },
    RuleDefinition {
        id: "document-title",
        name: "Page must have a title",
        wcag: "2.4.2",
        level: WcagLevel::A,
        category: Category::Operable,
        severity: Severity::Serious,
        description: "The document has no non-empty <title>, so tabs and history entries are unidentifiable.",
        help: "Add a <title> element that describes the page's topic or purpose.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/page-titled.html",
        advisory: false,
    },
    RuleDefinition {
        id: "heading-presence",
        name: "Page should contain headings",
        wcag: "2.4.6",
        level: WcagLevel::AA,
        category: Category::Operable,
        severity: Severity::Moderate,
        description: "The page has no heading elements, leaving screen reader users no structure to navigate by.",
        help: "Organize content under h1-h6 headings, starting with a single <h1>.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/headings-and-labels.html",
        advisory: false,
    },
    RuleDefinition {
        id: "heading-order",
        name: "Heading levels must not be skipped",
        wcag: "1.3.1",
        level: WcagLevel::A,
        category: Category::Perceivable,
        severity: Severity::Moderate,
        description: "One or more headings jump more than one level past the preceding heading.",
        help: "Increase heading levels one step at a time; use CSS for visual sizing.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/info-and-relationships.html",
        advisory: false,
    },
    RuleDefinition {
        id: "landmark-regions",
        name: "Page must define landmark regions",
        wcag: "1.3.1",
        level: WcagLevel::A,
        category: Category::Perceivable,
        severity: Severity::Moderate,
        description: "No main, nav, header, or footer landmarks (by tag or role) were found.",
        help: "Wrap primary content in <main> and use <nav>, <header>, and <footer> for page regions.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/info-and-relationships.html",
        advisory: false,
    },
    RuleDefinition {
        id: "table-headers",
        name: "Data tables must have header cells",
        wcag: "1.3.1",
        level: WcagLevel::A,
        category: Category::Perceivable,
        severity: Severity::Serious,
        description: "One or more data tables have no <th> cells, so cell relationships are not conveyed.",
        help: "Add <th> cells (with scope) for each column or row header.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/info-and-relationships.html",
        advisory: false,
    },
    RuleDefinition {
        id: "color-contrast",
        name: "Text must meet minimum contrast",
        wcag: "1.4.3",
        level: WcagLevel::AA,
        category: Category::Perceivable,
        severity: Severity::Serious,
        description: "One or more elements set foreground and background colors below the 4.5:1 AA ratio. The 3:1 large-text relaxation is not modelled.",
        help: "Increase the contrast between text and background to at least 4.5:1.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/contrast-minimum.html",
        advisory: false,
    },
    RuleDefinition {
        id: "viewport-meta",
        name: "Page must have a viewport meta tag",
        wcag: "1.4.10",
        level: WcagLevel::AA,
        category: Category::Perceivable,
        severity: Severity::Moderate,
        description: "No viewport meta tag was found; the page will not reflow on small screens.",
        help: "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/reflow.html",
        advisory: false,
    },
    RuleDefinition {
        id: "meta-refresh",
        name: "Page must not auto-refresh",
        wcag: "2.2.1",
        level: WcagLevel::A,
        category: Category::Operable,
        severity: Severity::Serious,
        description: "A meta refresh directive reloads or redirects the page on a timer users cannot control.",
        help: "Remove the meta refresh; let users reload or navigate themselves.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/timing-adjustable.html",
        advisory: false,
    },
    RuleDefinition {
        id: "positive-tabindex",
        name: "Tabindex values must not be positive",
        wcag: "2.4.3",
        level: WcagLevel::A,
        category: Category::Operable,
        severity: Severity::Moderate,
        description: "One or more elements use a positive tabindex, overriding the natural focus order.",
        help: "Use tabindex=\"0\" (or none) and let document order drive focus.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/focus-order.html",
        advisory: false,
    },
    RuleDefinition {
        id: "autoplay-media",
        name: "Media must not autoplay with sound",
        wcag: "1.4.2",
        level: WcagLevel::A,
        category: Category::Perceivable,
        severity: Severity::Serious,
        description: "One or more audio/video elements autoplay unmuted, interfering with screen reader output.",
        help: "Remove autoplay, or add the muted attribute and visible playback controls.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/audio-control.html",
        advisory: false,
    },
    RuleDefinition {
        id: "keyboard-trap",
        name: "Key handlers must not trap focus",
        wcag: "2.1.2",
        level: WcagLevel::A,
        category: Category::Operable,
        severity: Severity::Serious,
        description: "One or more key handlers suppress default key behavior without handling Tab or Escape, risking a keyboard trap.",
        help: "Let Tab and Escape through, or handle them explicitly before calling preventDefault.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/no-keyboard-trap.html",
        advisory: false,
    },
    RuleDefinition {
        id: "focus-visible",
        name: "Focus indicators must stay visible",
        wcag: "2.4.7",
        level: WcagLevel::AA,
        category: Category::Operable,
        severity: Severity::Serious,
        description: "One or more focus styles remove the outline without a box-shadow or border replacement.",
        help: "Keep the outline on :focus, or replace it with a clearly visible box-shadow or border.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/focus-visible.html",
        advisory: false,
    },
    RuleDefinition {
        id: "keyboard-access",
        name: "Click targets must be keyboard reachable",
        wcag: "2.1.1",
        level: WcagLevel::A,
        category: Category::Operable,
        severity: Severity::Serious,
        description: "One or more non-interactive elements have click handlers but no keyboard path (tabindex plus key handler).",
        help: "Use a <button>, or add tabindex=\"0\" and an onkeydown handler alongside onclick.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/keyboard.html",
        advisory: false,
    },
    RuleDefinition {
        id: "generic-link-text",
        name: "Link text should describe the destination",
        wcag: "2.4.4",
        level: WcagLevel::A,
        category: Category::Operable,
        severity: Severity::Minor,
        description: "One or more links use generic text (\"click here\", \"read more\") that means nothing out of context.",
        help: "Rewrite link text to name the destination, e.g. \"read the pricing guide\".",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/link-purpose-in-context.html",
        advisory: false,
    },
    RuleDefinition {
        id: "skip-link",
        name: "Page should offer a skip link",
        wcag: "2.4.1",
        level: WcagLevel::A,
        category: Category::Operable,
        severity: Severity::Minor,
        description: "The page has navigation but none of its first links bypasses it.",
        help: "Add <a href=\"#main\">Skip to main content</a> as the first focusable element.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/bypass-blocks.html",
        advisory: true,
    },
    RuleDefinition {
        id: "first-heading-h1",
        name: "First heading should be an h1",
        wcag: "1.3.1",
        level: WcagLevel::A,
        category: Category::Perceivable,
        severity: Severity::Minor,
        description: "The first heading on the page is not an <h1>.",
        help: "Start the heading outline with a single <h1> naming the page.",
        help_url: "https://www.w3.org/WAI/WCAG21/Understanding/info-and-relationships.html",
        advisory: true,
    },
];

/// The full rule catalogue, in declaration order
pub fn catalog() -> &'static [RuleDefinition] {
    CATALOG
}

/// Look up a rule definition by its stable identifier
pub fn definition(id: &str) -> Option<&'static RuleDefinition> {
    CATALOG.iter().find(|def| def.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_size() {
        assert!(catalog().len() >= 20, "catalogue should span 20+ rules");
    }

    #[test]
    fn test_rule_ids_unique() {
        let ids: HashSet<&str> = catalog().iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), catalog().len());
    }

    #[test]
    fn test_definition_lookup() {
        let def = definition("img-alt").expect("img-alt is catalogued");
        assert_eq!(def.wcag, "1.1.1");
        assert!(definition("no-such-rule").is_none());
    }

    #[test]
    fn test_advisory_rules_are_minor() {
        for def in catalog().iter().filter(|d| d.advisory) {
            assert_eq!(
                def.severity,
                crate::record::Severity::Minor,
                "advisory rule {} should be minor",
                def.id
            );
        }
    }
}

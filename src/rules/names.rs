// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessible-name predicates: images, form controls, buttons, links,
//! and frames.
//!
//! An element lacks an accessible name only if none of the recognized
//! naming mechanisms is present: explicit label association, a wrapping
//! label, aria-label/aria-labelledby, a title attribute, or an
//! alt-bearing child image. These rules are inapplicable when the page
//! has no candidate elements.

use super::{attr_nonempty, excerpt, selector, Verdict};
use scraper::{ElementRef, Html};

/// Input types that never need a visible label
const EXEMPT_INPUT_TYPES: &[&str] = &["hidden", "submit", "reset", "button", "image"];

/// Every `<img>` must carry an alt attribute (empty alt marks the image
/// decorative and passes).
pub fn img_alt(document: &Html) -> Verdict {
    let images: Vec<ElementRef<'_>> = document.select(&selector("img")).collect();
    if images.is_empty() {
        return Verdict::Inapplicable;
    }

    let violations = images
        .iter()
        .filter(|img| img.value().attr("alt").is_none())
        .map(|img| excerpt(*img))
        .collect();
    Verdict::from_violations(violations)
}

/// Labelable form controls must have an associated label.
pub fn input_label(document: &Html) -> Verdict {
    let label_fors: Vec<String> = document
        .select(&selector("label[for]"))
        .filter_map(|label| label.value().attr("for").map(String::from))
        .collect();

    let mut candidates: Vec<ElementRef<'_>> = document
        .select(&selector("input"))
        .filter(|input| {
            let input_type = input.value().attr("type").unwrap_or("text");
            !EXEMPT_INPUT_TYPES.contains(&input_type)
        })
        .collect();
    candidates.extend(document.select(&selector("select, textarea")));

    if candidates.is_empty() {
        return Verdict::Inapplicable;
    }

    let violations = candidates
        .iter()
        .filter(|control| !has_label(**control, &label_fors))
        .map(|control| excerpt(*control))
        .collect();
    Verdict::from_violations(violations)
}

fn has_label(control: ElementRef<'_>, label_fors: &[String]) -> bool {
    if let Some(id) = control.value().attr("id") {
        if label_fors.iter().any(|target| target == id) {
            return true;
        }
    }
    attr_nonempty(control, "aria-label")
        || attr_nonempty(control, "aria-labelledby")
        || attr_nonempty(control, "title")
        || has_label_ancestor(control)
}

fn has_label_ancestor(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().name() == "label")
}

/// Buttons (and button-like inputs) must announce something.
pub fn button_name(document: &Html) -> Verdict {
    let buttons: Vec<ElementRef<'_>> = document.select(&selector("button")).collect();
    let button_inputs: Vec<ElementRef<'_>> = document
        .select(&selector(
            "input[type=\"submit\"], input[type=\"button\"], input[type=\"reset\"], input[type=\"image\"]",
        ))
        .collect();

    if buttons.is_empty() && button_inputs.is_empty() {
        return Verdict::Inapplicable;
    }

    let mut violations = Vec::new();
    for button in &buttons {
        if !has_text_content(*button)
            && !attr_nonempty(*button, "aria-label")
            && !attr_nonempty(*button, "aria-labelledby")
            && !attr_nonempty(*button, "title")
            && !has_named_child_image(*button)
        {
            violations.push(excerpt(*button));
        }
    }
    for input in &button_inputs {
        let is_image = input.value().attr("type") == Some("image");
        let named = attr_nonempty(*input, "value")
            || attr_nonempty(*input, "aria-label")
            || attr_nonempty(*input, "title")
            || (is_image && attr_nonempty(*input, "alt"));
        if !named {
            violations.push(excerpt(*input));
        }
    }
    Verdict::from_violations(violations)
}

/// Links must announce their destination.
pub fn link_name(document: &Html) -> Verdict {
    let links: Vec<ElementRef<'_>> = document.select(&selector("a[href]")).collect();
    if links.is_empty() {
        return Verdict::Inapplicable;
    }

    let violations = links
        .iter()
        .filter(|link| {
            !has_text_content(**link)
                && !attr_nonempty(**link, "aria-label")
                && !attr_nonempty(**link, "aria-labelledby")
                && !attr_nonempty(**link, "title")
                && !has_named_child_image(**link)
        })
        .map(|link| excerpt(*link))
        .collect();
    Verdict::from_violations(violations)
}

/// Frames must carry a descriptive title attribute.
pub fn iframe_title(document: &Html) -> Verdict {
    let frames: Vec<ElementRef<'_>> = document.select(&selector("iframe")).collect();
    if frames.is_empty() {
        return Verdict::Inapplicable;
    }

    let violations = frames
        .iter()
        .filter(|frame| !attr_nonempty(**frame, "title"))
        .map(|frame| excerpt(*frame))
        .collect();
    Verdict::from_violations(violations)
}

fn has_text_content(element: ElementRef<'_>) -> bool {
    element.text().any(|chunk| !chunk.trim().is_empty())
}

fn has_named_child_image(element: ElementRef<'_>) -> bool {
    element
        .select(&selector("img"))
        .any(|img| attr_nonempty(img, "alt"))
}

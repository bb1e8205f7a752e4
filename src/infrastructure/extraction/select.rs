//! Selector fallback evaluation.
//!
//! Every field is described by an ordered list of candidates; the first one
//! that yields a non-empty value wins. Candidate lists are plain data (see
//! [`super::config`]) compiled once at extractor construction.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{ExtractError, ExtractResult};

/// One fallback candidate: a CSS selector plus the attribute to read, or
/// the element's text content when `attr` is `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorSpec {
    pub css: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
}

impl SelectorSpec {
    /// Candidate reading the matched element's text content.
    pub fn text(css: &str) -> Self {
        Self {
            css: css.to_string(),
            attr: None,
        }
    }

    /// Candidate reading an attribute of the matched element.
    pub fn attr(css: &str, attr: &str) -> Self {
        Self {
            css: css.to_string(),
            attr: Some(attr.to_string()),
        }
    }
}

/// Compiled form of a [`SelectorSpec`].
#[derive(Debug, Clone)]
pub struct CompiledSelector {
    pub selector: Selector,
    pub attr: Option<String>,
}

/// Compile a candidate list, skipping entries that fail to parse.
///
/// A bad entry is logged and dropped so one typo cannot take the whole
/// field down; compilation fails only when a non-empty list yields nothing.
pub fn compile(field: &str, specs: &[SelectorSpec]) -> ExtractResult<Vec<CompiledSelector>> {
    let mut compiled = Vec::with_capacity(specs.len());
    let mut errors = Vec::new();

    for spec in specs {
        match Selector::parse(&spec.css) {
            Ok(selector) => compiled.push(CompiledSelector {
                selector,
                attr: spec.attr.clone(),
            }),
            Err(e) => {
                warn!("failed to compile selector '{}' for {}: {}", spec.css, field, e);
                errors.push(format!("'{}': {}", spec.css, e));
            }
        }
    }

    if compiled.is_empty() && !specs.is_empty() {
        return Err(ExtractError::selector_list_invalid(field, errors));
    }

    Ok(compiled)
}

/// Compile a plain CSS selector list (no attribute component).
pub fn compile_css(field: &str, css_list: &[String]) -> ExtractResult<Vec<Selector>> {
    let specs: Vec<SelectorSpec> = css_list.iter().map(|css| SelectorSpec::text(css)).collect();
    Ok(compile(field, &specs)?
        .into_iter()
        .map(|compiled| compiled.selector)
        .collect())
}

/// Read a candidate's value from an element: the configured attribute, or
/// the trimmed text content. Empty values count as no match.
pub fn element_value(element: ElementRef<'_>, attr: Option<&str>) -> Option<String> {
    let raw = match attr {
        Some(name) => element.value().attr(name)?.to_string(),
        None => element.text().collect::<String>(),
    };
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Evaluate a fallback chain against the whole document.
pub fn first_value(html: &Html, candidates: &[CompiledSelector]) -> Option<String> {
    candidates.iter().find_map(|candidate| {
        html.select(&candidate.selector)
            .find_map(|element| element_value(element, candidate.attr.as_deref()))
    })
}

/// Evaluate a fallback chain scoped under one container element.
pub fn first_value_in(scope: ElementRef<'_>, candidates: &[CompiledSelector]) -> Option<String> {
    candidates.iter().find_map(|candidate| {
        scope
            .select(&candidate.selector)
            .find_map(|element| element_value(element, candidate.attr.as_deref()))
    })
}

/// All elements matched by the first selector that matches anything.
///
/// Selector groups are alternatives for the same page region, not unions;
/// the first layout that exists on the page wins.
pub fn select_group<'a>(html: &'a Html, selectors: &[Selector]) -> Vec<ElementRef<'a>> {
    for selector in selectors {
        let elements: Vec<ElementRef<'a>> = html.select(selector).collect();
        if !elements.is_empty() {
            return elements;
        }
    }
    Vec::new()
}

/// Scoped variant of [`select_group`].
pub fn select_group_in<'a>(scope: ElementRef<'a>, selectors: &[Selector]) -> Vec<ElementRef<'a>> {
    for selector in selectors {
        let elements: Vec<ElementRef<'a>> = scope.select(selector).collect();
        if !elements.is_empty() {
            return elements;
        }
    }
    Vec::new()
}

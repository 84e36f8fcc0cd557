//! Read-only view over a permissively parsed HTML page.
//!
//! Parsing never fails: html5ever recovers whatever structure it can from
//! malformed markup and the metric extractors work on that best-effort tree.

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use tracing::{debug, error};

/// Parse a CSS selector, falling back to one that matches nothing.
///
/// Extractors keep their selectors in statics built with this function, so a
/// typo degrades that query to "no matches" instead of aborting the audit.
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| {
        error!("Failed to parse CSS selector '{}': {}. Using fallback selector.", css, e);
        Selector::parse("*:not(*)").unwrap_or_else(|_| unreachable!("fallback selector is valid"))
    })
}

/// Collapse every whitespace run to a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A parsed page plus the raw markup it came from
pub struct Document<'a> {
    html: Html,
    raw: &'a str,
}

/// Owned snapshot of one element: its tag, attributes and collapsed text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementView {
    pub name: String,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
}

impl ElementView {
    fn from_ref(element: ElementRef<'_>) -> Self {
        Self {
            name: element.value().name().to_string(),
            attrs: element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            text: element_text(element),
        }
    }

    /// Attribute value, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Attribute value, if present and not blank
    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|value| !value.trim().is_empty())
    }
}

impl<'a> Document<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let html = Html::parse_document(raw);
        if !html.errors.is_empty() {
            debug!("Markup parsed with {} recoverable errors", html.errors.len());
        }
        Self { html, raw }
    }

    /// The markup exactly as fetched
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Number of recoverable parse errors html5ever reported
    pub fn parse_issues(&self) -> usize {
        self.html.errors.len()
    }

    /// Number of elements matching `selector`
    pub fn count(&self, selector: &Selector) -> usize {
        self.html.select(selector).count()
    }

    /// Trimmed value of `attr` on the first match, when non-empty
    pub fn first_attr(&self, selector: &Selector, attr: &str) -> Option<String> {
        self.html
            .select(selector)
            .next()
            .and_then(|element| element.value().attr(attr))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from)
    }

    /// Collapsed text of the first match, or an empty string
    pub fn text_of(&self, selector: &Selector) -> String {
        self.html
            .select(selector)
            .next()
            .map(element_text)
            .unwrap_or_default()
    }

    /// Owned views of every match, in document order
    pub fn elements(&self, selector: &Selector) -> Vec<ElementView> {
        self.html.select(selector).map(ElementView::from_ref).collect()
    }

    /// Count opening `<tag ...>` occurrences directly in the raw markup.
    ///
    /// Matching is ASCII case-insensitive and requires the tag name to be followed
    /// by `>`, `/` or whitespace, so `<linkedin>` is not counted as `<link>`.
    pub fn raw_tag_count(&self, tag: &str) -> usize {
        let haystack = self.raw.to_ascii_lowercase();
        let needle = format!("<{}", tag.to_ascii_lowercase());

        haystack
            .match_indices(&needle)
            .filter(|(index, _)| {
                let rest = &haystack[index + needle.len()..];
                match rest.chars().next() {
                    Some(c) if c == '>' || c == '/' || c.is_whitespace() => rest.contains('>'),
                    _ => false,
                }
            })
            .count()
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_markup_does_not_fail() {
        let raw = "<html><head><title>Broken</title><body><p>one<p>two<div><span>unclosed";
        let doc = Document::parse(raw);
        assert_eq!(doc.count(&selector("p")), 2);
        assert_eq!(doc.raw(), raw);
    }

    #[test]
    fn test_text_is_whitespace_collapsed() {
        let doc = Document::parse("<body>\n  <p>Hello   <b>big</b>\n world</p></body>");
        assert_eq!(doc.text_of(&selector("body")), "Hello big world");
        assert_eq!(doc.text_of(&selector("h1")), "");
    }

    #[test]
    fn test_first_attr_skips_blank_values() {
        let doc = Document::parse(
            r#"<head><meta name="robots" content="  "><link rel="canonical" href=" /home "></head>"#,
        );
        assert_eq!(doc.first_attr(&selector("meta[name='robots']"), "content"), None);
        assert_eq!(
            doc.first_attr(&selector("link[rel='canonical']"), "href").as_deref(),
            Some("/home")
        );
    }

    #[test]
    fn test_elements_capture_attributes() {
        let doc = Document::parse(r#"<a href="/a" rel="nofollow">  A  </a><a>B</a>"#);
        let anchors = doc.elements(&selector("a"));
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].attr("href"), Some("/a"));
        assert_eq!(anchors[0].text, "A");
        assert_eq!(anchors[1].non_empty_attr("href"), None);
    }

    #[test]
    fn test_raw_tag_count() {
        let doc = Document::parse(
            "<SCRIPT src=a.js></SCRIPT><script>x</script><link rel=x/><linkedin><style>b{}</style>",
        );
        assert_eq!(doc.raw_tag_count("script"), 2);
        assert_eq!(doc.raw_tag_count("link"), 1);
        assert_eq!(doc.raw_tag_count("style"), 1);
        assert_eq!(doc.raw_tag_count("iframe"), 0);
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let doc = Document::parse("<p>x</p>");
        assert_eq!(doc.count(&selector("p[[")), 0);
    }
}

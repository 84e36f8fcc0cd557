//! Anchor inventory split into internal and external links.
//!
//! Link targets are never requested, so `broken_count` stays 0.

use crate::markup::{selector, Document, ElementView};
use crate::types::{LinkDetail, LinkMetrics};
use scraper::Selector;
use std::sync::LazyLock;
use tracing::debug;

static ANCHORS: LazyLock<Selector> = LazyLock::new(|| selector("a"));

/// Classify anchors relative to `host`, the audited page's host name
pub fn extract_links(doc: &Document<'_>, host: Option<&str>) -> LinkMetrics {
    let anchors = doc.elements(&ANCHORS);
    let host = host.map(str::to_ascii_lowercase);

    let mut internal_links = Vec::new();
    let mut external_links = Vec::new();

    for anchor in &anchors {
        let Some(detail) = link_detail(anchor) else {
            continue;
        };
        if is_internal(&detail.href, host.as_deref()) {
            internal_links.push(detail);
        } else {
            external_links.push(detail);
        }
    }

    let nofollow_count = internal_links
        .iter()
        .chain(&external_links)
        .filter(|link| link.is_nofollow)
        .count();

    let metrics = LinkMetrics {
        total: anchors.len(),
        internal_count: internal_links.len(),
        external_count: external_links.len(),
        nofollow_count,
        broken_count: 0,
        internal_links,
        external_links,
    };

    debug!(
        "Links: {} anchors, {} internal, {} external, {} nofollow",
        metrics.total, metrics.internal_count, metrics.external_count, metrics.nofollow_count
    );

    metrics
}

fn link_detail(anchor: &ElementView) -> Option<LinkDetail> {
    let href = anchor.non_empty_attr("href")?.trim().to_string();
    let rel = anchor.attr("rel").map(String::from);
    let is_nofollow = rel
        .as_deref()
        .is_some_and(|rel| rel.to_ascii_lowercase().contains("nofollow"));

    Some(LinkDetail {
        href,
        anchor_text: anchor.text.clone(),
        title: anchor.attr("title").map(String::from),
        rel,
        is_nofollow,
    })
}

/// Root-relative paths and anything mentioning the audited host are internal
fn is_internal(href: &str, host: Option<&str>) -> bool {
    if href.starts_with('/') {
        return true;
    }
    match host {
        Some(host) if !host.is_empty() => href.to_ascii_lowercase().contains(host),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<body>
        <a href="/about" title="About us">About</a>
        <a href="https://Example.com/blog">Blog</a>
        <a href="https://other.org/" rel="NoFollow noopener">Partner</a>
        <a href="contact.html">Contact</a>
        <a href="">Empty</a>
        <a name="anchor">No href</a>
    </body>"#;

    #[test]
    fn test_classifies_links() {
        let metrics = extract_links(&Document::parse(PAGE), Some("example.com"));

        assert_eq!(metrics.total, 6);
        assert_eq!(metrics.internal_count, 2);
        assert_eq!(metrics.external_count, 2);
        assert_eq!(metrics.nofollow_count, 1);
        assert_eq!(metrics.broken_count, 0);

        let about = &metrics.internal_links[0];
        assert_eq!(about.href, "/about");
        assert_eq!(about.anchor_text, "About");
        assert_eq!(about.title.as_deref(), Some("About us"));
        assert!(!about.is_nofollow);

        let partner = &metrics.external_links[0];
        assert_eq!(partner.rel.as_deref(), Some("NoFollow noopener"));
        assert!(partner.is_nofollow);

        // relative paths without a leading slash do not mention the host
        assert_eq!(metrics.external_links[1].href, "contact.html");
    }

    #[test]
    fn test_without_host_only_root_relative_links_are_internal() {
        let metrics = extract_links(&Document::parse(PAGE), None);
        assert_eq!(metrics.internal_count, 1);
        assert_eq!(metrics.external_count, 3);
    }
}

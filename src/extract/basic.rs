//! Title, description, headings, image alt coverage and head meta tags

use crate::extract::percentage;
use crate::markup::{selector, Document};
use crate::types::{BasicSeoMetrics, HeadingCounts, ImageAltCoverage, TextLengthCheck};
use scraper::Selector;
use std::ops::RangeInclusive;
use std::sync::LazyLock;
use tracing::debug;

/// Title lengths search engines display without truncation
pub const TITLE_OPTIMAL_LEN: RangeInclusive<usize> = 50..=60;
/// Description lengths search engines display without truncation
pub const DESCRIPTION_OPTIMAL_LEN: RangeInclusive<usize> = 150..=160;

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| selector("meta[name='description']"));
static CANONICAL: LazyLock<Selector> = LazyLock::new(|| selector("link[rel='canonical']"));
static ROBOTS: LazyLock<Selector> = LazyLock::new(|| selector("meta[name='robots']"));
static VIEWPORT: LazyLock<Selector> = LazyLock::new(|| selector("meta[name='viewport']"));
static IMAGES: LazyLock<Selector> = LazyLock::new(|| selector("img"));
static H1: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static H2: LazyLock<Selector> = LazyLock::new(|| selector("h2"));
static H3: LazyLock<Selector> = LazyLock::new(|| selector("h3"));
static H4: LazyLock<Selector> = LazyLock::new(|| selector("h4"));

/// Content of the viewport meta tag, shared with the mobile extractor
pub(crate) fn viewport_content(doc: &Document<'_>) -> Option<String> {
    doc.first_attr(&VIEWPORT, "content")
}

pub fn extract_basic_seo(doc: &Document<'_>) -> BasicSeoMetrics {
    let title = length_check(doc.text_of(&TITLE), &TITLE_OPTIMAL_LEN);
    let description = length_check(
        doc.first_attr(&DESCRIPTION, "content").unwrap_or_default(),
        &DESCRIPTION_OPTIMAL_LEN,
    );

    let headings = HeadingCounts {
        h1: doc.count(&H1),
        h2: doc.count(&H2),
        h3: doc.count(&H3),
        h4: doc.count(&H4),
    };

    let images = doc.elements(&IMAGES);
    let with_alt = images
        .iter()
        .filter(|img| img.non_empty_attr("alt").is_some())
        .count();
    let images = ImageAltCoverage {
        total: images.len(),
        with_alt,
        alt_percentage: percentage(with_alt, images.len()),
    };

    let metrics = BasicSeoMetrics {
        title,
        description,
        headings,
        images,
        canonical: doc.first_attr(&CANONICAL, "href"),
        robots: doc.first_attr(&ROBOTS, "content"),
        viewport: viewport_content(doc),
    };

    debug!(
        "Basic SEO: title {} chars, description {} chars, {} h1, {}/{} images with alt",
        metrics.title.length,
        metrics.description.length,
        metrics.headings.h1,
        metrics.images.with_alt,
        metrics.images.total
    );

    metrics
}

fn length_check(text: String, optimal: &RangeInclusive<usize>) -> TextLengthCheck {
    let length = text.chars().count();
    TextLengthCheck {
        text,
        length,
        is_optimal: optimal.contains(&length),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_head_metadata() {
        let title = "a".repeat(55);
        let description = "d".repeat(155);
        let raw = format!(
            r#"<html><head>
                <title>  {title}  </title>
                <meta name="description" content="{description}">
                <link rel="canonical" href="https://example.com/">
                <meta name="robots" content="index,follow">
                <meta name="viewport" content="width=device-width, initial-scale=1">
            </head><body><h1>One</h1><h2>a</h2><h2>b</h2><h4>x</h4></body></html>"#
        );
        let metrics = extract_basic_seo(&Document::parse(&raw));

        assert_eq!(metrics.title.length, 55);
        assert!(metrics.title.is_optimal);
        assert_eq!(metrics.description.length, 155);
        assert!(metrics.description.is_optimal);
        assert_eq!(metrics.canonical.as_deref(), Some("https://example.com/"));
        assert_eq!(metrics.robots.as_deref(), Some("index,follow"));
        assert!(metrics.viewport.is_some());
        assert_eq!(
            metrics.headings,
            HeadingCounts { h1: 1, h2: 2, h3: 0, h4: 1 }
        );
    }

    #[test]
    fn test_title_length_counts_characters() {
        let metrics = extract_basic_seo(&Document::parse("<title>Café</title>"));
        assert_eq!(metrics.title.length, 4);
        assert!(!metrics.title.is_optimal);
    }

    #[test]
    fn test_image_alt_coverage() {
        let raw = r#"<img src="a.png" alt="A"><img src="b.png" alt=""><img src="c.png"><img alt="D">"#;
        let metrics = extract_basic_seo(&Document::parse(raw));
        assert_eq!(metrics.images.total, 4);
        assert_eq!(metrics.images.with_alt, 2);
        assert_eq!(metrics.images.alt_percentage, 50.0);
    }

    #[test]
    fn test_no_images_yields_zero_percentage() {
        let metrics = extract_basic_seo(&Document::parse("<p>text only</p>"));
        assert_eq!(metrics.images.total, 0);
        assert_eq!(metrics.images.alt_percentage, 0.0);
        assert!(!metrics.images.alt_percentage.is_nan());
        assert_eq!(metrics.title.text, "");
        assert_eq!(metrics.description.length, 0);
    }
}

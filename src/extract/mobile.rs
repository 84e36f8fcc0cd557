//! Viewport, tap-target and text sizing checks.
//!
//! There is no layout engine here, so element sizes come only from inline hints:
//! `width`/`height` attributes and `width`/`height`/`font-size` declarations in the
//! `style` attribute, in pixels. An element without a usable hint is treated as
//! adequately sized. Pages styled from stylesheets therefore read as mobile
//! friendly on sizing; only the viewport check is reliable for them.

use crate::extract::basic::viewport_content;
use crate::extract::percentage;
use crate::markup::{selector, Document, ElementView};
use crate::types::{MobileMetrics, SizingCheck};
use scraper::Selector;
use std::sync::LazyLock;
use tracing::debug;

/// Minimum comfortable tap target edge, in CSS pixels
pub const MIN_TAP_TARGET_PX: f64 = 48.0;
/// Minimum legible body font size, in CSS pixels
pub const MIN_FONT_SIZE_PX: f64 = 16.0;

static TAP_TARGETS: LazyLock<Selector> = LazyLock::new(|| {
    selector("button, a, input[type='submit'], input[type='button']")
});
static TEXT_ELEMENTS: LazyLock<Selector> = LazyLock::new(|| selector("p, span, div, li, td, th"));

pub fn extract_mobile(doc: &Document<'_>) -> MobileMetrics {
    let viewport = viewport_content(doc);
    let mut hints_seen = false;

    let targets = doc.elements(&TAP_TARGETS);
    let mut undersized_targets = 0;
    for target in &targets {
        let (width, height) = (dimension(target, "width"), dimension(target, "height"));
        hints_seen |= width.is_some() || height.is_some();
        if [width, height]
            .iter()
            .flatten()
            .any(|px| *px < MIN_TAP_TARGET_PX)
        {
            undersized_targets += 1;
        }
    }

    let texts = doc.elements(&TEXT_ELEMENTS);
    let mut undersized_texts = 0;
    for text in &texts {
        let font_size = text
            .attr("style")
            .and_then(|style| style_property(style, "font-size"))
            .and_then(parse_px);
        hints_seen |= font_size.is_some();
        if font_size.is_some_and(|px| px < MIN_FONT_SIZE_PX) {
            undersized_texts += 1;
        }
    }

    let metrics = MobileMetrics {
        has_viewport: viewport.is_some(),
        viewport_content: viewport,
        tap_targets: sizing(undersized_targets, targets.len()),
        text_elements: sizing(undersized_texts, texts.len()),
        layout_hints_available: hints_seen,
    };

    debug!(
        "Mobile: viewport {}, {}/{} small tap targets, {}/{} small text elements",
        metrics.has_viewport,
        metrics.tap_targets.undersized,
        metrics.tap_targets.total,
        metrics.text_elements.undersized,
        metrics.text_elements.total
    );

    metrics
}

fn sizing(undersized: usize, total: usize) -> SizingCheck {
    SizingCheck {
        total,
        undersized,
        percentage: percentage(undersized, total),
    }
}

/// Pixel size from the inline style, falling back to the presentational attribute
fn dimension(element: &ElementView, name: &str) -> Option<f64> {
    element
        .attr("style")
        .and_then(|style| style_property(style, name))
        .and_then(parse_px)
        .or_else(|| element.attr(name).and_then(parse_px))
}

/// Value of one declaration in an inline `style` attribute
fn style_property<'s>(style: &'s str, property: &str) -> Option<&'s str> {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| value.trim())
}

/// Positive pixel length: `12px`, `12.5px` or a bare `12`. Other units are unknown.
fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim().trim_end_matches("!important").trim();
    let split = value.len().checked_sub(2);
    let number = match split.and_then(|at| value.get(at..).map(|unit| (at, unit))) {
        Some((at, unit)) if unit.eq_ignore_ascii_case("px") => &value[..at],
        _ => value,
    };
    number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|px| px.is_finite() && *px > 0.0)
}

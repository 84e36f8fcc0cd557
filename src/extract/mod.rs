//! Metric extractors, one per metric group.
//!
//! Every extractor is a pure function over the shared, read-only [`Document`]
//! (plus the fetch outcome where it needs headers or timing). None of them can
//! fail: missing data degrades to zero or neutral values.
//!
//! [`Document`]: crate::markup::Document

pub mod basic;
pub mod content;
pub mod links;
pub mod mobile;
pub mod performance;
pub mod security;

pub use basic::extract_basic_seo;
pub use content::extract_content;
pub use links::extract_links;
pub use mobile::extract_mobile;
pub use performance::extract_performance;
pub use security::extract_security;

/// `part / whole` as a percentage, 0 when `whole` is 0
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

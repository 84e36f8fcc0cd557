//! Load-time and page-weight proxies

use crate::config::PerformanceBudget;
use crate::fetch::FetchResult;
use crate::markup::Document;
use crate::scoring::performance_score;
use crate::types::{PerformanceMetrics, RenderBlockingCounts};
use tracing::debug;

pub fn extract_performance(
    doc: &Document<'_>,
    fetch: &FetchResult,
    budget: &PerformanceBudget,
) -> PerformanceMetrics {
    let size_kb = fetch.body.len() as f64 / 1024.0;

    let metrics = PerformanceMetrics {
        load_time_ms: fetch.elapsed_ms,
        html_size_kb: (size_kb * 100.0).round() / 100.0,
        render_blocking: RenderBlockingCounts {
            scripts: doc.raw_tag_count("script"),
            styles: doc.raw_tag_count("style"),
            links: doc.raw_tag_count("link"),
        },
        score: performance_score(fetch.elapsed_ms, budget),
    };

    debug!(
        "Performance: {} ms, {} KB, score {}",
        metrics.load_time_ms, metrics.html_size_kb, metrics.score
    );

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_size() {
        let body = format!(
            "<html><head><script src=a.js></script><script async src=b.js></script>\
             <style>p{{}}</style><link rel=stylesheet href=x.css><link rel=icon href=i.png>\
             </head><body>{}</body></html>",
            "x".repeat(2048)
        );
        let fetch = FetchResult::ok(body.clone(), 1200);
        let metrics = extract_performance(&Document::parse(&body), &fetch, &PerformanceBudget::default());

        assert_eq!(metrics.load_time_ms, 1200);
        assert_eq!(metrics.score, 100.0);
        assert_eq!(
            metrics.render_blocking,
            RenderBlockingCounts { scripts: 2, styles: 1, links: 2 }
        );
        let expected_kb = ((body.len() as f64 / 1024.0) * 100.0).round() / 100.0;
        assert_eq!(metrics.html_size_kb, expected_kb);
    }

    #[test]
    fn test_slow_page_loses_points() {
        let fetch = FetchResult::ok("<p>hi</p>", 3050);
        let metrics = extract_performance(
            &Document::parse(&fetch.body),
            &fetch,
            &PerformanceBudget::default(),
        );
        assert_eq!(metrics.score, 99.0);
    }
}

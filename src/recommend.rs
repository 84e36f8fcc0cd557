//! Actionable findings derived from the metric records.
//!
//! Rules run in a fixed order and each contributes at most one recommendation.
//! The output keeps that order; it is not sorted by priority.

use crate::config::PerformanceBudget;
use crate::extract::basic::{DESCRIPTION_OPTIMAL_LEN, TITLE_OPTIMAL_LEN};
use crate::types::{
    Category, ComparativeRecommendation, PageMetrics, Priority, Recommendation,
};

/// Word count below which a page is considered thin
pub const MIN_WORD_COUNT: usize = 300;

type Rule = fn(&PageMetrics, &PerformanceBudget) -> Option<Recommendation>;

const RULES: [Rule; 7] = [
    title_rule,
    description_rule,
    image_alt_rule,
    load_time_rule,
    viewport_rule,
    https_rule,
    word_count_rule,
];

/// Evaluate every rule against the page metrics
pub fn generate_recommendations(
    metrics: &PageMetrics,
    budget: &PerformanceBudget,
) -> Vec<Recommendation> {
    RULES.iter().filter_map(|rule| rule(metrics, budget)).collect()
}

fn recommendation(
    priority: Priority,
    category: Category,
    title: &str,
    description: String,
    remediation: &str,
) -> Recommendation {
    Recommendation {
        priority,
        category,
        title: title.to_string(),
        description,
        remediation: remediation.to_string(),
    }
}

fn title_rule(metrics: &PageMetrics, _: &PerformanceBudget) -> Option<Recommendation> {
    let title = &metrics.basic.title;
    (!title.is_optimal).then(|| {
        recommendation(
            Priority::High,
            Category::Basic,
            "Optimize Page Title",
            format!(
                "Title should be {}-{} characters. Current: {}",
                TITLE_OPTIMAL_LEN.start(),
                TITLE_OPTIMAL_LEN.end(),
                title.length
            ),
            "Update the <title> tag in your HTML",
        )
    })
}

fn description_rule(metrics: &PageMetrics, _: &PerformanceBudget) -> Option<Recommendation> {
    let description = &metrics.basic.description;
    (!description.is_optimal).then(|| {
        recommendation(
            Priority::High,
            Category::Basic,
            "Optimize Meta Description",
            format!(
                "Description should be {}-{} characters. Current: {}",
                DESCRIPTION_OPTIMAL_LEN.start(),
                DESCRIPTION_OPTIMAL_LEN.end(),
                description.length
            ),
            "Update the meta description tag",
        )
    })
}

fn image_alt_rule(metrics: &PageMetrics, _: &PerformanceBudget) -> Option<Recommendation> {
    let images = &metrics.basic.images;
    (images.alt_percentage < 100.0).then(|| {
        recommendation(
            Priority::Medium,
            Category::Basic,
            "Add Alt Text to Images",
            format!(
                "{}% of images missing alt text",
                (100.0 - images.alt_percentage).round()
            ),
            "Add descriptive alt attributes to all <img> tags",
        )
    })
}

fn load_time_rule(metrics: &PageMetrics, budget: &PerformanceBudget) -> Option<Recommendation> {
    let load_time = metrics.performance.load_time_ms;
    (load_time > budget.budget_ms).then(|| {
        recommendation(
            Priority::High,
            Category::Performance,
            "Improve Page Load Time",
            format!(
                "Page loads in {}ms (should be under {}ms)",
                load_time, budget.budget_ms
            ),
            "Optimize images, enable compression, reduce render-blocking resources",
        )
    })
}

fn viewport_rule(metrics: &PageMetrics, _: &PerformanceBudget) -> Option<Recommendation> {
    (!metrics.mobile.has_viewport).then(|| {
        recommendation(
            Priority::High,
            Category::Mobile,
            "Add Viewport Meta Tag",
            "Missing viewport tag for mobile responsiveness".to_string(),
            r#"Add <meta name="viewport" content="width=device-width, initial-scale=1">"#,
        )
    })
}

fn https_rule(metrics: &PageMetrics, _: &PerformanceBudget) -> Option<Recommendation> {
    (!metrics.security.is_https).then(|| {
        recommendation(
            Priority::Critical,
            Category::Security,
            "Enable HTTPS",
            "Website is not using HTTPS".to_string(),
            "Install SSL certificate and redirect HTTP to HTTPS",
        )
    })
}

fn word_count_rule(metrics: &PageMetrics, _: &PerformanceBudget) -> Option<Recommendation> {
    let words = metrics.content.word_count;
    (words < MIN_WORD_COUNT).then(|| {
        recommendation(
            Priority::Medium,
            Category::Content,
            "Add More Content",
            format!("Only {} words (aim for {}+)", words, MIN_WORD_COUNT),
            "Add more valuable content to the page",
        )
    })
}

/// Suggest studying a competitor that outscores the primary site
pub fn competitor_recommendation(
    primary_score: u8,
    competitor_url: &str,
    competitor_score: u8,
) -> Option<ComparativeRecommendation> {
    (competitor_score > primary_score).then(|| ComparativeRecommendation {
        title: "Learn from Competitor".to_string(),
        description: format!(
            "{} scores {} vs your {}",
            competitor_url, competitor_score, primary_score
        ),
        action: format!("Analyze {} for best practices", competitor_url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze_page;
    use crate::config::AuditConfig;
    use crate::fetch::{AuditRequest, FetchResult};

    fn metrics_for(url: &str, body: &str, elapsed_ms: u64) -> PageMetrics {
        let request = AuditRequest::new(url, 1000).unwrap();
        let fetch = FetchResult::ok(body, elapsed_ms);
        analyze_page(&request, &fetch, &AuditConfig::default()).metrics
    }

    #[test]
    fn test_bare_http_page_fires_rules_in_declaration_order() {
        let metrics = metrics_for("http://example.com", "<img src=a.png><p>short</p>", 4000);
        let recommendations = generate_recommendations(&metrics, &PerformanceBudget::default());

        let titles: Vec<_> = recommendations.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Optimize Page Title",
                "Optimize Meta Description",
                "Add Alt Text to Images",
                "Improve Page Load Time",
                "Add Viewport Meta Tag",
                "Enable HTTPS",
                "Add More Content",
            ]
        );
        assert_eq!(recommendations[5].priority, Priority::Critical);
        assert_eq!(recommendations[5].category, Category::Security);
        assert_eq!(recommendations[2].description, "100% of images missing alt text");
        assert_eq!(
            recommendations[3].description,
            "Page loads in 4000ms (should be under 3000ms)"
        );
        assert_eq!(recommendations[6].description, "Only 1 words (aim for 300+)");
    }

    #[test]
    fn test_well_built_page_has_no_recommendations() {
        let body = format!(
            r#"<html><head><title>{}</title>
               <meta name="description" content="{}">
               <meta name="viewport" content="width=device-width, initial-scale=1">
               </head><body><img src="a.png" alt="A">{}</body></html>"#,
            "t".repeat(55),
            "d".repeat(155),
            "<p>word </p>".repeat(300)
        );
        let metrics = metrics_for("https://example.com", &body, 500);
        assert!(generate_recommendations(&metrics, &PerformanceBudget::default()).is_empty());
    }

    #[test]
    fn test_load_time_at_budget_does_not_fire() {
        let metrics = metrics_for("https://example.com", "", 3000);
        let recommendations = generate_recommendations(&metrics, &PerformanceBudget::default());
        assert!(recommendations
            .iter()
            .all(|r| r.category != Category::Performance));
    }

    #[test]
    fn test_pages_without_images_get_alt_recommendation() {
        let metrics = metrics_for("https://example.com", "<p>no pictures</p>", 10);
        assert_eq!(metrics.basic.images.alt_percentage, 0.0);

        let recommendations = generate_recommendations(&metrics, &PerformanceBudget::default());
        let alt = recommendations
            .iter()
            .find(|r| r.title == "Add Alt Text to Images")
            .unwrap();
        assert_eq!(alt.priority, Priority::Medium);
        assert_eq!(alt.category, Category::Basic);
        assert_eq!(alt.description, "100% of images missing alt text");
    }

    #[test]
    fn test_competitor_recommendation() {
        assert!(competitor_recommendation(80, "https://rival.example", 80).is_none());
        assert!(competitor_recommendation(80, "https://rival.example", 70).is_none());

        let rec = competitor_recommendation(60, "https://rival.example", 85).unwrap();
        assert_eq!(rec.title, "Learn from Competitor");
        assert_eq!(rec.description, "https://rival.example scores 85 vs your 60");
        assert_eq!(rec.action, "Analyze https://rival.example for best practices");
    }
}

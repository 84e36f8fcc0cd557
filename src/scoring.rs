//! Sub-score and composite scoring

use crate::config::{PerformanceBudget, ScoringConfig, ScoringWeights};
use crate::types::{
    BasicSeoMetrics, ContentMetrics, MobileMetrics, PageMetrics, ScoreReport, SecurityMetrics,
};
use tracing::debug;

// Basic SEO point allocation
const OPTIMAL_TEXT_POINTS: f64 = 15.0;
const PRESENT_TEXT_POINTS: f64 = 10.0;
const SINGLE_H1_POINTS: f64 = 10.0;
const H2_POINTS: f64 = 5.0;
const H3_POINTS: f64 = 5.0;
const MAX_IMAGE_POINTS: f64 = 20.0;
const META_TAG_POINTS: f64 = 10.0;

// Mobile
const VIEWPORT_POINTS: f64 = 40.0;

// Security
const HTTPS_POINTS: f64 = 30.0;
const HSTS_POINTS: f64 = 20.0;
const XSS_PROTECTION_POINTS: f64 = 15.0;
const FRAME_OPTIONS_POINTS: f64 = 15.0;
const NOSNIFF_POINTS: f64 = 10.0;
const CORS_POINTS: f64 = 10.0;

// Content structure
const PARAGRAPH_POINTS: f64 = 15.0;
const MIN_PARAGRAPHS: usize = 5;
const LIST_POINTS: f64 = 15.0;
const MIN_LISTS: usize = 2;

/// Score every weighted metric group and combine them
pub fn calculate_scores(metrics: &PageMetrics, config: &ScoringConfig) -> ScoreReport {
    let basic = basic_score(&metrics.basic);
    let performance = metrics.performance.score;
    let mobile = mobile_score(&metrics.mobile, config);
    let security = security_score(&metrics.security);
    let content = content_score(&metrics.content, config);

    let raw_total = weighted_total(
        [basic, performance, mobile, security, content],
        &config.weights,
    );
    let grade = config.grades.grade_for(raw_total);
    let total = raw_total.round() as u8;

    debug!(
        "Scores: basic {}, performance {}, mobile {}, security {}, content {} => {} ({})",
        basic, performance, mobile, security, content, total, grade
    );

    ScoreReport {
        basic,
        performance,
        mobile,
        security,
        content,
        total,
        grade,
    }
}

/// Full marks under budget, then one point lost per `ms_per_point` over it
pub fn performance_score(load_time_ms: u64, budget: &PerformanceBudget) -> f64 {
    if load_time_ms < budget.budget_ms {
        return 100.0;
    }
    let over = (load_time_ms - budget.budget_ms) as f64;
    (100.0 - over / budget.ms_per_point).max(0.0)
}

pub fn basic_score(basic: &BasicSeoMetrics) -> f64 {
    let text_points = |optimal: bool, length: usize| {
        if optimal {
            OPTIMAL_TEXT_POINTS
        } else if length > 0 {
            PRESENT_TEXT_POINTS
        } else {
            0.0
        }
    };
    let flag = |present: bool, points: f64| if present { points } else { 0.0 };

    let mut score = text_points(basic.title.is_optimal, basic.title.length)
        + text_points(basic.description.is_optimal, basic.description.length);

    score += flag(basic.headings.h1 == 1, SINGLE_H1_POINTS);
    score += flag(basic.headings.h2 >= 2, H2_POINTS);
    score += flag(basic.headings.h3 >= 3, H3_POINTS);

    score += (basic.images.alt_percentage / 5.0).min(MAX_IMAGE_POINTS);

    score += flag(basic.canonical.is_some(), META_TAG_POINTS);
    score += flag(basic.robots.is_some(), META_TAG_POINTS);
    score += flag(basic.viewport.is_some(), META_TAG_POINTS);

    score.clamp(0.0, 100.0)
}

pub fn mobile_score(mobile: &MobileMetrics, config: &ScoringConfig) -> f64 {
    let viewport = if mobile.has_viewport { VIEWPORT_POINTS } else { 0.0 };
    let score = viewport
        + config.tap_target_bands.points_for(mobile.tap_targets.percentage)
        + config.text_size_bands.points_for(mobile.text_elements.percentage);
    score.clamp(0.0, 100.0)
}

pub fn security_score(security: &SecurityMetrics) -> f64 {
    [
        (security.is_https, HTTPS_POINTS),
        (security.has_hsts, HSTS_POINTS),
        (security.has_xss_protection, XSS_PROTECTION_POINTS),
        (security.has_frame_options, FRAME_OPTIONS_POINTS),
        (security.has_nosniff, NOSNIFF_POINTS),
        (security.has_cors, CORS_POINTS),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, points)| points)
    .sum()
}

pub fn content_score(content: &ContentMetrics, config: &ScoringConfig) -> f64 {
    let mut score = config.word_count_bands.points_for(content.word_count as f64)
        + config
            .keyword_density_bands
            .points_for(content.keyword_density_percent);

    if content.paragraph_count >= MIN_PARAGRAPHS {
        score += PARAGRAPH_POINTS;
    }
    if content.list_count >= MIN_LISTS {
        score += LIST_POINTS;
    }

    score.clamp(0.0, 100.0)
}

/// Weighted sum of `[basic, performance, mobile, security, content]`, clamped to 0-100.
///
/// Left unrounded: the grade is taken from this value and only the reported
/// total is rounded.
pub fn weighted_total(subscores: [f64; 5], weights: &ScoringWeights) -> f64 {
    let weights = [
        weights.basic,
        weights.performance,
        weights.mobile,
        weights.security,
        weights.content,
    ];
    let total: f64 = subscores
        .iter()
        .zip(weights.iter())
        .map(|(score, weight)| score * weight / 100.0)
        .sum();
    total.clamp(0.0, 100.0)
}

//! # site_quality_audit
//!
//! Audits a single web page and scores it across six metric groups:
//! - **Basic SEO**: title and description length, headings, image alt text, head meta tags
//! - **Performance**: load time, page weight and render-blocking tag counts
//! - **Mobile**: viewport, tap-target and text sizing
//! - **Security**: HTTPS and security response headers
//! - **Content**: word count, domain keyword coverage, readability and structure
//! - **Links**: internal/external anchor inventory
//!
//! The first five are combined into a weighted 0-100 score and a letter grade,
//! followed by prioritized recommendations. Several sites can be audited side by
//! side and ranked against each other.
//!
//! ## Quick Start
//!
//! ```no_run
//! use site_quality_audit::{audit_url, AuditConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = AuditConfig::default();
//! let result = audit_url("https://example.com", &config).await?;
//!
//! println!("{}: {} ({})", result.url, result.scores.total, result.scores.grade);
//! for rec in result.recommendations {
//!     println!("[{}] {}: {}", rec.priority, rec.title, rec.description);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - Bounded-concurrency competitor comparison
//! - Configurable weights, grade boundaries, banding tables and keyword list
//! - Pluggable [`Fetcher`] for running the pipeline over pre-fetched content
//! - CLI tool with JSON and Markdown output

mod audit;
mod compare;
mod config;
mod error;
mod extract;
mod fetch;
mod markup;
mod recommend;
mod scoring;
mod types;

// Re-export public API
pub use audit::{analyze_page, audit_url, Auditor};
pub use compare::{compare_sites, rank};
pub use config::{
    AuditConfig, AuditConfigBuilder, Band, BandDirection, BandTable, ContentConfig,
    GradeThresholds, NetworkConfig, PerformanceBudget, ScoringConfig, ScoringWeights,
    DEFAULT_KEYWORDS,
};
pub use error::{AuditError, Result};
pub use fetch::{AuditRequest, FetchResult, Fetcher, HttpFetcher, USER_AGENT};
pub use types::{
    AuditResult, BasicSeoMetrics, Category, ComparativeRecommendation, ComparisonResult,
    ContentMetrics, FailedCompetitor, Grade, HeadingCounts, ImageAltCoverage, LinkDetail,
    LinkMetrics, MobileMetrics, PageMetrics, PerformanceMetrics, Priority, RankedScore,
    Recommendation, RenderBlockingCounts, ScoreReport, SecurityMetrics, SizingCheck,
    TextLengthCheck,
};

//! Main audit orchestration logic

use crate::config::AuditConfig;
use crate::error::{AuditError, Result};
use crate::extract::{
    extract_basic_seo, extract_content, extract_links, extract_mobile, extract_performance,
    extract_security,
};
use crate::fetch::{AuditRequest, FetchResult, Fetcher, HttpFetcher};
use crate::markup::Document;
use crate::recommend::generate_recommendations;
use crate::scoring::calculate_scores;
use crate::types::{AuditResult, PageMetrics};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Audit a single URL with the default HTTP fetcher
pub async fn audit_url(url: &str, config: &AuditConfig) -> Result<AuditResult> {
    let auditor = Auditor::new(HttpFetcher::new(&config.network)?, config.clone())?;
    auditor.audit(url).await
}

/// Score an already fetched page.
///
/// This is the network-free part of the pipeline: identical inputs always
/// produce an identical result.
pub fn analyze_page(
    request: &AuditRequest,
    fetch: &FetchResult,
    config: &AuditConfig,
) -> AuditResult {
    let doc = Document::parse(&fetch.body);
    if doc.parse_issues() > 0 {
        debug!(
            "{}: continuing on best-effort markup ({} parse issues)",
            request.as_str(),
            doc.parse_issues()
        );
    }

    let metrics = PageMetrics {
        basic: extract_basic_seo(&doc),
        performance: extract_performance(&doc, fetch, &config.performance),
        mobile: extract_mobile(&doc),
        security: extract_security(request, fetch),
        content: extract_content(&doc, &config.content),
        links: extract_links(&doc, request.host()),
    };

    let scores = calculate_scores(&metrics, &config.scoring);
    let recommendations = generate_recommendations(&metrics, &config.performance);

    AuditResult {
        url: request.as_str().to_string(),
        metrics,
        scores,
        recommendations,
    }
}

/// Runs the audit pipeline with a given fetcher and configuration
pub struct Auditor<F> {
    fetcher: Arc<F>,
    config: Arc<AuditConfig>,
}

impl<F> Clone for Auditor<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            config: Arc::clone(&self.config),
        }
    }
}

impl<F: Fetcher + 'static> Auditor<F> {
    /// Create an auditor, rejecting invalid configuration up front
    pub fn new(fetcher: F, config: AuditConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            fetcher: Arc::new(fetcher),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch and audit `url` using the configured timeout
    pub async fn audit(&self, url: &str) -> Result<AuditResult> {
        let request = AuditRequest::new(url, self.config.network.timeout_ms)?;
        self.audit_request(&request).await
    }

    /// Fetch and audit a prepared request. A failed fetch aborts the audit.
    pub async fn audit_request(&self, request: &AuditRequest) -> Result<AuditResult> {
        info!("Starting audit of {}", request.as_str());

        let fetch = self.fetcher.fetch(request).await;
        if let Some(reason) = fetch.failure_reason() {
            warn!("Audit of {} aborted: {}", request.as_str(), reason);
            return Err(AuditError::fetch(request.as_str(), reason));
        }

        let result = analyze_page(request, &fetch, &self.config);

        info!(
            "Audit of {} complete: score {} ({}), {} recommendations",
            result.url,
            result.scores.total,
            result.scores.grade,
            result.recommendations.len()
        );

        Ok(result)
    }
}

//! Competitor comparison: audit several sites concurrently and rank them

use crate::audit::Auditor;
use crate::config::AuditConfig;
use crate::error::{AuditError, Result};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::recommend::competitor_recommendation;
use crate::types::{AuditResult, ComparisonResult, FailedCompetitor, RankedScore};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Compare `primary` against `competitors` with the default HTTP fetcher
pub async fn compare_sites<S: AsRef<str>>(
    primary: &str,
    competitors: &[S],
    config: &AuditConfig,
) -> Result<ComparisonResult> {
    let auditor = Auditor::new(HttpFetcher::new(&config.network)?, config.clone())?;
    auditor.compare(primary, competitors).await
}

impl<F: Fetcher + 'static> Auditor<F> {
    /// Audit the primary URL and every competitor, then rank the results.
    ///
    /// At most `network.max_concurrent_audits` audits run at once. A failed
    /// primary audit fails the comparison; failed competitors are reported in
    /// `failed_competitors` and left out of the ranking.
    pub async fn compare<S: AsRef<str>>(
        &self,
        primary: &str,
        competitors: &[S],
    ) -> Result<ComparisonResult> {
        info!(
            "Comparing {} against {} competitors",
            primary,
            competitors.len()
        );

        let semaphore = Arc::new(Semaphore::new(self.config().network.max_concurrent_audits));
        let mut tasks = Vec::with_capacity(competitors.len() + 1);
        tasks.push(self.spawn_audit(primary.to_string(), Arc::clone(&semaphore)));
        for competitor in competitors {
            tasks.push(self.spawn_audit(competitor.as_ref().to_string(), Arc::clone(&semaphore)));
        }

        let mut tasks = tasks.into_iter();
        let primary_task = tasks
            .next()
            .ok_or_else(|| AuditError::TaskError("primary audit was not scheduled".to_string()))?;

        let primary_result = match join(primary_task).await {
            Ok(result) => result,
            Err(e) => {
                for task in tasks {
                    task.abort();
                }
                return Err(e);
            }
        };

        let mut competitor_results = Vec::with_capacity(competitors.len());
        let mut failed_competitors = Vec::new();
        for (competitor, task) in competitors.iter().zip(tasks) {
            match join(task).await {
                Ok(result) => competitor_results.push(result),
                Err(e) => {
                    warn!("Skipping competitor {}: {}", competitor.as_ref(), e);
                    failed_competitors.push(FailedCompetitor {
                        url: competitor.as_ref().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let comparison = rank(&primary_result, &competitor_results, failed_competitors);

        info!(
            "Comparison complete: {} ranked, {} failed",
            comparison.ranked_scores.len(),
            comparison.failed_competitors.len()
        );

        Ok(comparison)
    }

    fn spawn_audit(
        &self,
        url: String,
        semaphore: Arc<Semaphore>,
    ) -> JoinHandle<Result<AuditResult>> {
        let auditor = self.clone();
        tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| AuditError::TaskError(format!("audit queue closed: {}", e)))?;
            auditor.audit(&url).await
        })
    }
}

async fn join(task: JoinHandle<Result<AuditResult>>) -> Result<AuditResult> {
    task.await
        .map_err(|e| AuditError::TaskError(e.to_string()))?
}

/// Rank successful audits by total score and derive the comparative recommendation.
///
/// The sort is stable over input order (primary first, then competitors as given),
/// so ties never depend on which audit finished first.
pub fn rank(
    primary: &AuditResult,
    competitors: &[AuditResult],
    failed_competitors: Vec<FailedCompetitor>,
) -> ComparisonResult {
    let entry = |result: &AuditResult, is_primary: bool| RankedScore {
        url: result.url.clone(),
        score: result.scores.total,
        grade: result.scores.grade,
        is_primary,
    };

    let mut ranked_scores: Vec<RankedScore> = std::iter::once(entry(primary, true))
        .chain(competitors.iter().map(|result| entry(result, false)))
        .collect();
    ranked_scores.sort_by(|a, b| b.score.cmp(&a.score));

    let best_competitor = competitors.iter().fold(None, |best: Option<&AuditResult>, candidate| {
        match best {
            Some(current) if current.scores.total >= candidate.scores.total => Some(current),
            _ => Some(candidate),
        }
    });

    let recommendations = best_competitor
        .and_then(|best| {
            competitor_recommendation(primary.scores.total, &best.url, best.scores.total)
        })
        .into_iter()
        .collect();

    ComparisonResult {
        ranked_scores,
        recommendations,
        failed_competitors,
    }
}

//! Example showing custom configuration and a competitor comparison

use site_quality_audit::{
    AuditConfig, Auditor, HttpFetcher, NetworkConfig, PerformanceBudget, ScoringWeights,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AuditConfig::builder()
        .scoring_weights(ScoringWeights {
            basic: 40.0, // Emphasize on-page SEO
            performance: 30.0,
            mobile: 15.0,
            security: 10.0,
            content: 10.0,
        })
        .performance(PerformanceBudget {
            budget_ms: 1500, // Stricter than the 3s default
            ms_per_point: 25.0,
        })
        .keywords(["pottery", "ceramics", "workshop", "glaze"])
        .network(NetworkConfig {
            max_concurrent_audits: 2,
            ..NetworkConfig::default()
        })
        .build();

    // The weights above sum to 105
    config.scoring.weights.normalize();

    let auditor = Auditor::new(HttpFetcher::new(&config.network)?, config)?;

    println!("Comparing with custom configuration...\n");
    let comparison = auditor
        .compare(
            "https://example.com",
            &["https://example.org", "https://example.net"],
        )
        .await?;

    println!("=== Ranking ===");
    for (rank, entry) in comparison.ranked_scores.iter().enumerate() {
        let marker = if entry.is_primary { " (you)" } else { "" };
        println!(
            "{}. {}{}: {} ({})",
            rank + 1,
            entry.url,
            marker,
            entry.score,
            entry.grade
        );
    }

    for rec in &comparison.recommendations {
        println!("\n{}: {}. {}", rec.title, rec.description, rec.action);
    }

    for failed in &comparison.failed_competitors {
        println!("\nSkipped {}: {}", failed.url, failed.reason);
    }

    Ok(())
}

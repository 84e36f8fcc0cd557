//! Basic example of auditing a single page

use site_quality_audit::{AuditConfig, Auditor, HttpFetcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com".to_string());

    let config = AuditConfig::default();
    let auditor = Auditor::new(HttpFetcher::new(&config.network)?, config)?;

    println!("Auditing {}...\n", url);
    let result = auditor.audit(&url).await?;

    println!("=== Audit Summary ===");
    println!("Total score: {} ({})", result.scores.total, result.scores.grade);
    println!("  Basic SEO:   {:.1}", result.scores.basic);
    println!("  Performance: {:.1}", result.scores.performance);
    println!("  Mobile:      {:.1}", result.scores.mobile);
    println!("  Security:    {:.1}", result.scores.security);
    println!("  Content:     {:.1}", result.scores.content);

    let links = &result.metrics.links;
    println!(
        "\nLinks: {} internal, {} external ({} nofollow)",
        links.internal_count, links.external_count, links.nofollow_count
    );

    if !result.recommendations.is_empty() {
        println!("\nRecommendations:");
        for rec in &result.recommendations {
            println!("  [{}] {}: {}", rec.priority, rec.title, rec.description);
        }
    }

    Ok(())
}

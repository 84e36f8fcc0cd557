//! CLI tool for auditing website quality

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use site_quality_audit::{
    AuditConfig, AuditResult, Auditor, ComparisonResult, Grade, HttpFetcher, Priority,
};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "site-audit")]
#[command(about = "Audit websites for SEO, performance, mobile, security and content quality", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to custom configuration file (TOML)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Per-page fetch timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Maximum number of sites audited at once during a comparison
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a page and display a summary
    Audit {
        /// URL of the page to audit
        url: String,

        /// Display the underlying metrics for each group
        #[arg(long)]
        detailed: bool,

        /// Fail if the total score is below this threshold (0-100)
        #[arg(long)]
        fail_below: Option<u8>,
    },

    /// Generate a detailed audit report
    Report {
        /// URL of the page to audit
        url: String,

        /// Output format
        #[arg(short = 'f', long, default_value = "markdown")]
        format: ReportFormat,

        /// Output file (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Rank a page against competitor pages
    Compare {
        /// URL of your own page
        url: String,

        /// Competitor URL (can be specified multiple times)
        #[arg(long = "competitor", required = true)]
        competitors: Vec<String>,

        /// Output format
        #[arg(short = 'f', long, default_value = "markdown")]
        format: ReportFormat,

        /// Output file (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Check a page against thresholds (exit code based)
    Check {
        /// URL of the page to audit
        url: String,

        /// Minimum acceptable total score (0-100)
        #[arg(long, default_value = "60")]
        min_score: u8,

        /// Fail when any critical recommendation is produced
        #[arg(long)]
        fail_on_critical: bool,
    },
}

#[derive(Clone, Debug)]
enum ReportFormat {
    Json,
    Markdown,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        match load_config(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{} Failed to load config: {:#}", "Error:".red().bold(), e);
                process::exit(1);
            }
        }
    } else {
        AuditConfig::default()
    };

    if let Some(timeout_ms) = cli.timeout_ms {
        config.network.timeout_ms = timeout_ms;
    }
    if let Some(concurrency) = cli.concurrency {
        config.network.max_concurrent_audits = concurrency;
    }

    let auditor = match HttpFetcher::new(&config.network)
        .and_then(|fetcher| Auditor::new(fetcher, config))
    {
        Ok(auditor) => auditor,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Audit {
            url,
            detailed,
            fail_below,
        } => {
            let result = run_audit(&auditor, &url).await;
            display_summary(&result);

            if detailed {
                println!();
                display_detailed(&result);
            }

            if let Some(threshold) = fail_below {
                if result.scores.total < threshold {
                    eprintln!(
                        "\n{} score {} is below threshold {}",
                        "Failed:".red().bold(),
                        result.scores.total,
                        threshold
                    );
                    process::exit(1);
                }
            }
        }

        Commands::Report {
            url,
            format,
            output,
        } => {
            let result = run_audit(&auditor, &url).await;
            let content = match format {
                ReportFormat::Json => to_json(&result),
                ReportFormat::Markdown => generate_markdown_report(&result),
            };
            emit(content, output.as_deref());
        }

        Commands::Compare {
            url,
            competitors,
            format,
            output,
        } => {
            let comparison = with_spinner(
                "Auditing sites...",
                auditor.compare(&url, &competitors),
            )
            .await;
            let comparison = match comparison {
                Ok(comparison) => comparison,
                Err(e) => {
                    error!("Comparison failed: {}", e);
                    eprintln!("{} Comparison failed: {}", "Error:".red().bold(), e);
                    process::exit(1);
                }
            };
            let content = match format {
                ReportFormat::Json => to_json(&comparison),
                ReportFormat::Markdown => generate_markdown_comparison(&comparison),
            };
            emit(content, output.as_deref());
        }

        Commands::Check {
            url,
            min_score,
            fail_on_critical,
        } => {
            let result = run_audit(&auditor, &url).await;
            let mut failures = Vec::new();

            if result.scores.total < min_score {
                failures.push(format!(
                    "  - total score {} < {}",
                    result.scores.total, min_score
                ));
            }

            if fail_on_critical {
                for rec in result
                    .recommendations
                    .iter()
                    .filter(|rec| rec.priority == Priority::Critical)
                {
                    failures.push(format!("  - critical: {}", rec.title));
                }
            }

            if !failures.is_empty() {
                eprintln!("{} {} check failures:", "Failed:".red().bold(), failures.len());
                for failure in failures {
                    eprintln!("{}", failure);
                }
                for rec in &result.recommendations {
                    eprintln!("    [{}] {}", rec.priority, rec.title);
                }
                process::exit(1);
            } else {
                println!("{} All checks passed!", "Success:".green().bold());
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: &Path) -> anyhow::Result<AuditConfig> {
    use anyhow::Context;

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: AuditConfig = toml::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

async fn with_spinner<T>(message: &'static str, work: impl Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let output = work.await;

    spinner.finish_and_clear();
    output
}

async fn run_audit(auditor: &Auditor<HttpFetcher>, url: &str) -> AuditResult {
    match with_spinner("Auditing page...", auditor.audit(url)).await {
        Ok(result) => result,
        Err(e) => {
            error!("Audit failed: {}", e);
            let label = if e.is_fetch_failure() {
                "Fetch failed:"
            } else {
                "Error:"
            };
            eprintln!("{} Audit failed: {}", label.red().bold(), e);
            process::exit(1);
        }
    }
}

fn emit(content: String, output: Option<&Path>) {
    if let Some(output_path) = output {
        match std::fs::write(output_path, content) {
            Ok(_) => println!("Report written to: {}", output_path.display()),
            Err(e) => {
                eprintln!("{} Failed to write report: {}", "Error:".red().bold(), e);
                process::exit(1);
            }
        }
    } else {
        println!("{}", content);
    }
}

fn colored_grade(grade: Grade) -> ColoredString {
    let label = grade.to_string();
    match grade {
        Grade::APlus | Grade::A => label.green(),
        Grade::B => label.yellow(),
        Grade::C | Grade::D => label.truecolor(255, 165, 0), // Orange
        Grade::F => label.red(),
    }
}

fn colored_priority(priority: Priority) -> ColoredString {
    let label = priority.to_string();
    match priority {
        Priority::Critical => label.red().bold(),
        Priority::High => label.red(),
        Priority::Medium => label.yellow(),
        Priority::Low => label.normal(),
    }
}

fn display_summary(result: &AuditResult) {
    let scores = &result.scores;

    println!("\n{}", "=== Audit Summary ===".bold());
    println!("URL: {}", result.url.cyan());
    println!(
        "Total score: {} ({})",
        scores.total.to_string().bold(),
        colored_grade(scores.grade)
    );
    println!();

    println!("Sub-scores:");
    println!("  Basic SEO:   {:>5.1}", scores.basic);
    println!("  Performance: {:>5.1}", scores.performance);
    println!("  Mobile:      {:>5.1}", scores.mobile);
    println!("  Security:    {:>5.1}", scores.security);
    println!("  Content:     {:>5.1}", scores.content);
    println!();

    if result.recommendations.is_empty() {
        println!("{}", "No recommendations. Nice work!".green());
    } else {
        println!("Recommendations:");
        for rec in &result.recommendations {
            println!(
                "  [{}] {} ({})",
                colored_priority(rec.priority),
                rec.title.bold(),
                rec.category
            );
            println!("      {}", rec.description);
            println!("      Fix: {}", rec.remediation);
        }
    }
}

fn display_detailed(result: &AuditResult) {
    let metrics = &result.metrics;
    println!("{}", "=== Detailed Metrics ===".bold());

    let basic = &metrics.basic;
    println!("\n{}", "Basic SEO".bold());
    println!("  Title: {:?} ({} chars)", basic.title.text, basic.title.length);
    println!("  Description: {} chars", basic.description.length);
    println!(
        "  Headings: h1 {}, h2 {}, h3 {}, h4 {}",
        basic.headings.h1, basic.headings.h2, basic.headings.h3, basic.headings.h4
    );
    println!(
        "  Images: {}/{} with alt ({:.0}%)",
        basic.images.with_alt, basic.images.total, basic.images.alt_percentage
    );
    println!(
        "  Canonical: {}, robots: {}, viewport: {}",
        basic.canonical.as_deref().unwrap_or("-"),
        basic.robots.as_deref().unwrap_or("-"),
        basic.viewport.as_deref().unwrap_or("-")
    );

    let perf = &metrics.performance;
    println!("\n{}", "Performance".bold());
    println!("  Load time: {} ms, HTML size: {:.2} KB", perf.load_time_ms, perf.html_size_kb);
    println!(
        "  Render-blocking tags: {} script, {} style, {} link",
        perf.render_blocking.scripts, perf.render_blocking.styles, perf.render_blocking.links
    );

    let mobile = &metrics.mobile;
    println!("\n{}", "Mobile".bold());
    println!(
        "  Small tap targets: {}/{} ({:.1}%)",
        mobile.tap_targets.undersized, mobile.tap_targets.total, mobile.tap_targets.percentage
    );
    println!(
        "  Small text elements: {}/{} ({:.1}%)",
        mobile.text_elements.undersized,
        mobile.text_elements.total,
        mobile.text_elements.percentage
    );
    if !mobile.layout_hints_available {
        println!("  {}", "No inline size hints found; sizing checks assume defaults".yellow());
    }

    let security = &metrics.security;
    println!("\n{}", "Security".bold());
    for (label, present) in [
        ("HTTPS", security.is_https),
        ("Strict-Transport-Security", security.has_hsts),
        ("X-XSS-Protection", security.has_xss_protection),
        ("X-Frame-Options", security.has_frame_options),
        ("X-Content-Type-Options: nosniff", security.has_nosniff),
        ("Access-Control-Allow-Origin", security.has_cors),
    ] {
        let mark = if present { "✓".green() } else { "✗".red() };
        println!("  {} {}", mark, label);
    }

    let content = &metrics.content;
    println!("\n{}", "Content".bold());
    println!(
        "  {} words, {} paragraphs, {} lists, avg sentence {} chars",
        content.word_count,
        content.paragraph_count,
        content.list_count,
        content.avg_sentence_length_chars
    );
    println!(
        "  Keyword coverage: {:.1}% ({})",
        content.keyword_density_percent,
        content.keywords_found.join(", ")
    );

    let links = &metrics.links;
    println!("\n{}", "Links".bold());
    println!(
        "  {} anchors: {} internal, {} external, {} nofollow",
        links.total, links.internal_count, links.external_count, links.nofollow_count
    );
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Failed to serialize report: {}", e);
        process::exit(1);
    })
}

fn generate_markdown_report(result: &AuditResult) -> String {
    let mut md = String::new();
    let scores = &result.scores;

    md.push_str(&format!("# Website Audit Report: {}\n\n", result.url));
    md.push_str(&format!("**Generated:** {}\n\n", chrono::Utc::now()));

    md.push_str("## Scores\n\n");
    md.push_str(&format!("- Total: {} ({})\n", scores.total, scores.grade));
    md.push_str(&format!("- Basic SEO: {:.1}\n", scores.basic));
    md.push_str(&format!("- Performance: {:.1}\n", scores.performance));
    md.push_str(&format!("- Mobile: {:.1}\n", scores.mobile));
    md.push_str(&format!("- Security: {:.1}\n", scores.security));
    md.push_str(&format!("- Content: {:.1}\n\n", scores.content));

    md.push_str("## Recommendations\n\n");
    if result.recommendations.is_empty() {
        md.push_str("None.\n");
    } else {
        md.push_str("| Priority | Category | Title | Description | Fix |\n");
        md.push_str("|----------|----------|-------|-------------|-----|\n");
        for rec in &result.recommendations {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                rec.priority,
                rec.category,
                rec.title,
                rec.description,
                rec.remediation.replace('|', "\\|")
            ));
        }
    }

    let links = &result.metrics.links;
    md.push_str("\n## Links\n\n");
    md.push_str(&format!(
        "- Anchors: {}\n- Internal: {}\n- External: {}\n- Nofollow: {}\n",
        links.total, links.internal_count, links.external_count, links.nofollow_count
    ));

    md
}

fn generate_markdown_comparison(comparison: &ComparisonResult) -> String {
    let mut md = String::new();

    md.push_str("# Competitor Comparison\n\n");
    md.push_str(&format!("**Generated:** {}\n\n", chrono::Utc::now()));

    md.push_str("## Ranking\n\n");
    md.push_str("| Rank | URL | Score | Grade |\n");
    md.push_str("|------|-----|-------|-------|\n");
    for (index, entry) in comparison.ranked_scores.iter().enumerate() {
        let url = if entry.is_primary {
            format!("**{}** (you)", entry.url)
        } else {
            entry.url.clone()
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            index + 1,
            url,
            entry.score,
            entry.grade
        ));
    }

    if !comparison.recommendations.is_empty() {
        md.push_str("\n## Recommendations\n\n");
        for rec in &comparison.recommendations {
            md.push_str(&format!("- **{}**: {}. {}\n", rec.title, rec.description, rec.action));
        }
    }

    if !comparison.failed_competitors.is_empty() {
        md.push_str("\n## Skipped\n\n");
        for failed in &comparison.failed_competitors {
            md.push_str(&format!("- {}: {}\n", failed.url, failed.reason));
        }
    }

    md
}

//! Core data types for audit reporting

use serde::{Deserialize, Serialize};

/// Complete audit of a single URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    /// The audited URL as requested
    pub url: String,
    /// Raw metric records for every metric group
    pub metrics: PageMetrics,
    /// Sub-scores, composite score and grade
    pub scores: ScoreReport,
    /// Findings in rule declaration order
    pub recommendations: Vec<Recommendation>,
}

/// The six metric groups extracted from one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetrics {
    pub basic: BasicSeoMetrics,
    pub performance: PerformanceMetrics,
    pub mobile: MobileMetrics,
    pub security: SecurityMetrics,
    pub content: ContentMetrics,
    pub links: LinkMetrics,
}

/// On-page SEO basics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicSeoMetrics {
    pub title: TextLengthCheck,
    pub description: TextLengthCheck,
    pub headings: HeadingCounts,
    pub images: ImageAltCoverage,
    pub canonical: Option<String>,
    pub robots: Option<String>,
    pub viewport: Option<String>,
}

/// A text field together with whether its length falls in the optimal range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLengthCheck {
    pub text: String,
    /// Length in characters
    pub length: usize,
    pub is_optimal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageAltCoverage {
    pub total: usize,
    pub with_alt: usize,
    /// Share of images with alt text (0 when there are no images)
    pub alt_percentage: f64,
}

/// Performance proxies derived from the fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Fetch elapsed time, not paint timing
    pub load_time_ms: u64,
    pub html_size_kb: f64,
    pub render_blocking: RenderBlockingCounts,
    /// 0-100, decays once the load time exceeds the budget
    pub score: f64,
}

/// Raw opening-tag counts; `async`/`defer`/media are not considered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderBlockingCounts {
    pub scripts: usize,
    pub styles: usize,
    pub links: usize,
}

/// Mobile-friendliness indicators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileMetrics {
    pub has_viewport: bool,
    pub viewport_content: Option<String>,
    pub tap_targets: SizingCheck,
    pub text_elements: SizingCheck,
    /// Whether any inspected element carried inline size information
    pub layout_hints_available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingCheck {
    pub total: usize,
    pub undersized: usize,
    /// Share of undersized elements (0 when there are none)
    pub percentage: f64,
}

/// Transport and header security posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityMetrics {
    pub is_https: bool,
    pub has_hsts: bool,
    pub has_xss_protection: bool,
    pub has_frame_options: bool,
    pub has_nosniff: bool,
    pub has_cors: bool,
}

/// Body-text quality indicators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetrics {
    pub word_count: usize,
    /// Share of configured keywords present in the page text
    pub keyword_density_percent: f64,
    pub keywords_found: Vec<String>,
    pub avg_sentence_length_chars: u64,
    pub paragraph_count: usize,
    pub list_count: usize,
}

/// Anchor inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkMetrics {
    /// Every `<a>` element, with or without an href
    pub total: usize,
    pub internal_count: usize,
    pub external_count: usize,
    pub nofollow_count: usize,
    /// Reserved. Link targets are never requested, so this is always 0.
    pub broken_count: usize,
    pub internal_links: Vec<LinkDetail>,
    pub external_links: Vec<LinkDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDetail {
    pub href: String,
    pub anchor_text: String,
    pub title: Option<String>,
    pub rel: Option<String>,
    pub is_nofollow: bool,
}

/// Sub-scores (0-100), weighted total and grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub basic: f64,
    pub performance: f64,
    pub mobile: f64,
    pub security: f64,
    pub content: f64,
    pub total: u8,
    pub grade: Grade,
}

/// Letter grade for a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::APlus => write!(f, "A+"),
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
            Self::F => write!(f, "F"),
        }
    }
}

/// Recommendation urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "Critical"),
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Metric group a recommendation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Basic,
    Performance,
    Mobile,
    Security,
    Content,
    Links,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Performance => write!(f, "performance"),
            Self::Mobile => write!(f, "mobile"),
            Self::Security => write!(f, "security"),
            Self::Content => write!(f, "content"),
            Self::Links => write!(f, "links"),
        }
    }
}

/// One actionable finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub remediation: String,
}

/// Outcome of auditing a primary URL against competitors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Successful audits, best score first
    pub ranked_scores: Vec<RankedScore>,
    /// At most one entry, present when a competitor outscores the primary
    pub recommendations: Vec<ComparativeRecommendation>,
    /// Competitors excluded from the ranking
    pub failed_competitors: Vec<FailedCompetitor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedScore {
    pub url: String,
    pub score: u8,
    pub grade: Grade,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparativeRecommendation {
    pub title: String,
    pub description: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedCompetitor {
    pub url: String,
    pub reason: String,
}

impl ComparisonResult {
    /// Ranking entry of the primary URL
    pub fn primary(&self) -> Option<&RankedScore> {
        self.ranked_scores.iter().find(|entry| entry.is_primary)
    }

    /// 1-based position of the primary URL in the ranking
    pub fn primary_rank(&self) -> Option<usize> {
        self.ranked_scores
            .iter()
            .position(|entry| entry.is_primary)
            .map(|index| index + 1)
    }
}

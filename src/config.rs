//! Configuration for audit behavior and scoring heuristics

use crate::error::{AuditError, Result};
use crate::types::Grade;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Keywords the content extractor looks for when no list is configured
pub const DEFAULT_KEYWORDS: [&str; 7] = [
    "design",
    "website",
    "mobile",
    "app",
    "development",
    "branding",
    "logo",
];

/// Main configuration for the audit process
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Weights, grade boundaries and banding tables
    pub scoring: ScoringConfig,
    /// Load-time budget for the performance score
    pub performance: PerformanceBudget,
    /// Content analysis settings
    pub content: ContentConfig,
    /// Network configuration
    pub network: NetworkConfig,
}

/// Everything the scorer needs besides the metric records themselves
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub grades: GradeThresholds,
    /// Points awarded for the percentage of undersized tap targets
    pub tap_target_bands: BandTable,
    /// Points awarded for the percentage of undersized text elements
    pub text_size_bands: BandTable,
    /// Points awarded for the body word count
    pub word_count_bands: BandTable,
    /// Points awarded for the keyword density percentage
    pub keyword_density_bands: BandTable,
}

/// Weights (in percent) of each sub-score in the composite total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub basic: f64,
    pub performance: f64,
    pub mobile: f64,
    pub security: f64,
    pub content: f64,
}

/// Inclusive lower bounds of each letter grade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeThresholds {
    pub a_plus: u8,
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
}

/// How a band threshold is compared against the measured value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandDirection {
    /// Band matches when `value >= threshold`
    AtLeast,
    /// Band matches when `value <= threshold`
    AtMost,
}

/// One `(threshold, points)` row of a banding table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub threshold: f64,
    pub points: f64,
}

/// Ordered threshold table. Rows are evaluated top-down and the first match wins;
/// a value matching no row earns zero points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    pub direction: BandDirection,
    pub bands: Vec<Band>,
}

/// Load-time budget used by the performance score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceBudget {
    /// Load times strictly below this earn the full score
    pub budget_ms: u64,
    /// Milliseconds over budget that cost one point
    pub ms_per_point: f64,
}

/// Content analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Domain keywords matched case-insensitively against the page text
    pub keywords: Vec<String>,
}

/// Network configuration for page fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Per-fetch timeout in milliseconds
    pub timeout_ms: u64,
    /// Connection establishment timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Upper bound on simultaneous audits during a comparison
    pub max_concurrent_audits: usize,
    /// Overrides the default user-agent string
    pub user_agent: Option<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let percentage_bands = BandTable::at_most(&[(10.0, 30.0), (20.0, 20.0), (30.0, 10.0)]);
        Self {
            weights: ScoringWeights::default(),
            grades: GradeThresholds::default(),
            tap_target_bands: percentage_bands.clone(),
            text_size_bands: percentage_bands,
            word_count_bands: BandTable::at_least(&[
                (1000.0, 40.0),
                (500.0, 30.0),
                (300.0, 20.0),
                (100.0, 10.0),
            ]),
            keyword_density_bands: BandTable::at_least(&[
                (20.0, 30.0),
                (15.0, 25.0),
                (10.0, 20.0),
                (5.0, 15.0),
                (2.0, 10.0),
            ]),
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            basic: 25.0,
            performance: 25.0,
            mobile: 20.0,
            security: 15.0,
            content: 15.0,
        }
    }
}

impl ScoringWeights {
    fn sum(&self) -> f64 {
        self.basic + self.performance + self.mobile + self.security + self.content
    }

    /// Validate that weights sum to approximately 100
    pub fn validate(&self) -> std::result::Result<(), String> {
        let sum = self.sum();
        if (sum - 100.0).abs() > 0.01 {
            return Err(format!("Scoring weights must sum to 100, got {}", sum));
        }
        if [self.basic, self.performance, self.mobile, self.security, self.content]
            .iter()
            .any(|w| *w < 0.0)
        {
            return Err("Scoring weights must not be negative".to_string());
        }
        Ok(())
    }

    /// Rescale weights so they sum to 100
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum > 0.0 {
            let factor = 100.0 / sum;
            self.basic *= factor;
            self.performance *= factor;
            self.mobile *= factor;
            self.security *= factor;
            self.content *= factor;
        }
    }
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            a_plus: 90,
            a: 80,
            b: 70,
            c: 60,
            d: 50,
        }
    }
}

impl GradeThresholds {
    /// Map an unrounded composite score to its letter grade
    pub fn grade_for(&self, score: f64) -> Grade {
        if score >= f64::from(self.a_plus) {
            Grade::APlus
        } else if score >= f64::from(self.a) {
            Grade::A
        } else if score >= f64::from(self.b) {
            Grade::B
        } else if score >= f64::from(self.c) {
            Grade::C
        } else if score >= f64::from(self.d) {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl BandTable {
    /// Table whose rows match values at or above their threshold
    pub fn at_least(rows: &[(f64, f64)]) -> Self {
        Self::from_rows(BandDirection::AtLeast, rows)
    }

    /// Table whose rows match values at or below their threshold
    pub fn at_most(rows: &[(f64, f64)]) -> Self {
        Self::from_rows(BandDirection::AtMost, rows)
    }

    fn from_rows(direction: BandDirection, rows: &[(f64, f64)]) -> Self {
        Self {
            direction,
            bands: rows
                .iter()
                .map(|&(threshold, points)| Band { threshold, points })
                .collect(),
        }
    }

    /// Points for the first row matching `value`, or zero
    pub fn points_for(&self, value: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| match self.direction {
                BandDirection::AtLeast => value >= band.threshold,
                BandDirection::AtMost => value <= band.threshold,
            })
            .map(|band| band.points)
            .unwrap_or(0.0)
    }
}

impl Default for PerformanceBudget {
    fn default() -> Self {
        Self {
            budget_ms: 3000,
            ms_per_point: 50.0,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            connect_timeout_ms: 5_000,
            max_concurrent_audits: 4,
            user_agent: None,
        }
    }
}

impl NetworkConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl AuditConfig {
    /// Create a new builder for AuditConfig
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::default()
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        self.scoring.weights.validate().map_err(AuditError::config)?;
        if self.network.timeout_ms == 0 {
            return Err(AuditError::config("network.timeout_ms must be greater than 0"));
        }
        if self.network.max_concurrent_audits == 0 {
            return Err(AuditError::config(
                "network.max_concurrent_audits must be greater than 0",
            ));
        }
        if self.performance.ms_per_point <= 0.0 {
            return Err(AuditError::config(
                "performance.ms_per_point must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Builder for AuditConfig
#[derive(Default)]
pub struct AuditConfigBuilder {
    scoring: Option<ScoringConfig>,
    weights: Option<ScoringWeights>,
    performance: Option<PerformanceBudget>,
    keywords: Option<Vec<String>>,
    network: Option<NetworkConfig>,
}

impl AuditConfigBuilder {
    pub fn scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = Some(scoring);
        self
    }

    pub fn scoring_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn performance(mut self, budget: PerformanceBudget) -> Self {
        self.performance = Some(budget);
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    pub fn network(mut self, network: NetworkConfig) -> Self {
        self.network = Some(network);
        self
    }

    pub fn build(self) -> AuditConfig {
        let mut scoring = self.scoring.unwrap_or_default();
        if let Some(weights) = self.weights {
            scoring.weights = weights;
        }
        AuditConfig {
            scoring,
            performance: self.performance.unwrap_or_default(),
            content: self
                .keywords
                .map(|keywords| ContentConfig { keywords })
                .unwrap_or_default(),
            network: self.network.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_100() {
        assert!(ScoringWeights::default().validate().is_ok());
        assert!(AuditConfig::default().validate().is_ok());
    }

    #[test]
    fn test_normalize_weights() {
        let mut weights = ScoringWeights {
            basic: 1.0,
            performance: 1.0,
            mobile: 1.0,
            security: 1.0,
            content: 1.0,
        };
        assert!(weights.validate().is_err());
        weights.normalize();
        assert!(weights.validate().is_ok());
        assert!((weights.basic - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_table_first_match_wins() {
        let bands = BandTable::at_least(&[(1000.0, 40.0), (500.0, 30.0), (100.0, 10.0)]);
        assert_eq!(bands.points_for(1500.0), 40.0);
        assert_eq!(bands.points_for(500.0), 30.0);
        assert_eq!(bands.points_for(99.0), 0.0);

        let bands = BandTable::at_most(&[(10.0, 30.0), (20.0, 20.0), (30.0, 10.0)]);
        assert_eq!(bands.points_for(0.0), 30.0);
        assert_eq!(bands.points_for(10.0), 30.0);
        assert_eq!(bands.points_for(20.5), 10.0);
        assert_eq!(bands.points_for(30.1), 0.0);
    }

    #[test]
    fn test_grade_boundaries_are_inclusive() {
        let grades = GradeThresholds::default();
        assert_eq!(grades.grade_for(100.0), Grade::APlus);
        assert_eq!(grades.grade_for(90.0), Grade::APlus);
        assert_eq!(grades.grade_for(89.5), Grade::A);
        assert_eq!(grades.grade_for(89.0), Grade::A);
        assert_eq!(grades.grade_for(70.0), Grade::B);
        assert_eq!(grades.grade_for(60.0), Grade::C);
        assert_eq!(grades.grade_for(50.0), Grade::D);
        assert_eq!(grades.grade_for(49.99), Grade::F);
        assert_eq!(grades.grade_for(0.0), Grade::F);
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = AuditConfig::builder()
            .network(NetworkConfig {
                max_concurrent_audits: 0,
                ..NetworkConfig::default()
            })
            .build();
        assert!(matches!(config.validate(), Err(AuditError::ConfigError(_))));
    }

    #[test]
    fn test_builder_overrides_keywords() {
        let config = AuditConfig::builder().keywords(["rust", "crate"]).build();
        assert_eq!(config.content.keywords, vec!["rust", "crate"]);
        assert_eq!(config.scoring.weights.basic, 25.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AuditConfig = toml::from_str(
            r#"
            [network]
            timeout_ms = 2500
            "#,
        )
        .unwrap();
        assert_eq!(config.network.timeout_ms, 2500);
        assert_eq!(config.network.max_concurrent_audits, 4);
        assert_eq!(config.performance.budget_ms, 3000);
        assert_eq!(config.content.keywords.len(), DEFAULT_KEYWORDS.len());
    }

    #[test]
    fn test_partial_performance_and_content_tables() {
        let config: AuditConfig = toml::from_str(
            r#"
            [performance]
            budget_ms = 2000

            [content]
            "#,
        )
        .unwrap();
        assert_eq!(config.performance.budget_ms, 2000);
        assert_eq!(config.performance.ms_per_point, 50.0);
        assert_eq!(config.content.keywords.len(), DEFAULT_KEYWORDS.len());
        assert!(config.validate().is_ok());
    }
}

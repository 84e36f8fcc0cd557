//! Body text volume, keyword coverage, readability and structure

use crate::config::ContentConfig;
use crate::extract::percentage;
use crate::markup::{selector, Document};
use crate::types::ContentMetrics;
use scraper::Selector;
use std::sync::LazyLock;
use tracing::debug;

static BODY: LazyLock<Selector> = LazyLock::new(|| selector("body"));
static PARAGRAPHS: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static LISTS: LazyLock<Selector> = LazyLock::new(|| selector("ul, ol"));

pub fn extract_content(doc: &Document<'_>, config: &ContentConfig) -> ContentMetrics {
    let text = doc.text_of(&BODY);
    let lowered = text.to_lowercase();

    let keywords_found: Vec<String> = config
        .keywords
        .iter()
        .filter(|keyword| !keyword.is_empty() && lowered.contains(&keyword.to_lowercase()))
        .cloned()
        .collect();

    let metrics = ContentMetrics {
        word_count: text.split_whitespace().count(),
        keyword_density_percent: percentage(keywords_found.len(), config.keywords.len()),
        keywords_found,
        avg_sentence_length_chars: average_sentence_length(&text),
        paragraph_count: doc.count(&PARAGRAPHS),
        list_count: doc.count(&LISTS),
    };

    debug!(
        "Content: {} words, {:.1}% keyword density, {} paragraphs, {} lists",
        metrics.word_count,
        metrics.keyword_density_percent,
        metrics.paragraph_count,
        metrics.list_count
    );

    metrics
}

/// Characters of text per sentence, rounded; 0 when there are no sentences
fn average_sentence_length(text: &str) -> u64 {
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|segment| !segment.trim().is_empty())
        .count();
    if sentences == 0 {
        return 0;
    }
    (text.chars().count() as f64 / sentences as f64).round() as u64
}

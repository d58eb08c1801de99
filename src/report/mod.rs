//! Analysis runs
//!
//! One run takes the raw multi-line input, classifies every review, and
//! collects everything the dashboard and the CSV export need.

pub mod export;

#[cfg(test)]
mod tests;

pub use export::{from_csv, to_csv, write_csv, CSV_FILE_NAME};

use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::keywords::{word_frequencies, KeywordCount, KeywordExtractor};
use crate::sentiment::{
    ClassificationResult, LexiconScorer, PolarityScorer, Sentiment, SentimentClassifier, Thresholds,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Example reviews offered by "Load Sample Reviews"
pub const SAMPLE_REVIEWS: &[&str] = &[
    "Great product! Loved the quality and fast delivery.",
    "Terrible experience. Product broke after 2 days.",
    "It's okay, nothing special but works fine.",
    "Amazing! Best purchase ever. Highly recommended.",
    "Not worth the money. Very disappointed.",
    "Good quality but delivery was slow.",
    "Perfect! Exactly what I needed.",
    "Average product, nothing extraordinary.",
    "Worst purchase ever. Don't buy this.",
    "Excellent quality and great customer service!",
    "The fabric is soft and comfortable.",
    "Very poor packaging, item was damaged.",
    "Satisfied with my purchase overall.",
    "Overpriced for what you get.",
    "Superb! Exceeded my expectations.",
];

/// Sample reviews joined one per line, as they appear in the text area
pub fn sample_text() -> String {
    SAMPLE_REVIEWS.join("\n")
}

/// One review per non-blank line, trimmed
pub fn split_reviews(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Count and share of one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelShare {
    pub sentiment: Sentiment,
    pub count: usize,
    /// Percentage of all reviews (0 to 100)
    pub percentage: f64,
}

/// Per-label totals of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub total: usize,
    /// One entry per label, Positive / Neutral / Negative
    pub shares: Vec<LabelShare>,
}

impl SentimentSummary {
    pub fn from_results(results: &[ClassificationResult]) -> Self {
        let total = results.len();
        let shares = Sentiment::ALL
            .iter()
            .map(|&sentiment| {
                let count = results.iter().filter(|r| r.sentiment == sentiment).count();
                let percentage = if total > 0 {
                    count as f64 / total as f64 * 100.0
                } else {
                    0.0
                };
                LabelShare {
                    sentiment,
                    count,
                    percentage,
                }
            })
            .collect();

        Self { total, shares }
    }

    pub fn share(&self, sentiment: Sentiment) -> Option<&LabelShare> {
        self.shares.iter().find(|s| s.sentiment == sentiment)
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        self.share(sentiment).map_or(0, |s| s.count)
    }

    pub fn percentage(&self, sentiment: Sentiment) -> f64 {
        self.share(sentiment).map_or(0.0, |s| s.percentage)
    }

    /// Labels that occurred at least once
    pub fn present(&self) -> impl Iterator<Item = &LabelShare> {
        self.shares.iter().filter(|s| s.count > 0)
    }
}

/// Everything produced by one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<ClassificationResult>,
    pub summary: SentimentSummary,
    /// Top keywords for the bar chart
    pub keywords: Vec<KeywordCount>,
    /// Word frequencies for the word cloud
    pub cloud_words: Vec<KeywordCount>,
}

impl Analysis {
    /// Raw review texts in input order
    pub fn reviews(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.review.as_str()).collect()
    }
}

/// Runs the classifier and keyword extraction over a batch of reviews
pub struct Analyzer<S = LexiconScorer> {
    classifier: SentimentClassifier<S>,
    extractor: KeywordExtractor,
    top_n: usize,
    cloud_max_words: usize,
}

impl Analyzer<LexiconScorer> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SentimentClassifier::new(LexiconScorer::new(), Thresholds::from(&config.classifier)),
            KeywordExtractor::from_config(&config.keywords),
            config.keywords.top_n,
            config.word_cloud.max_words,
        )
    }
}

impl Default for Analyzer<LexiconScorer> {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl<S: PolarityScorer> Analyzer<S> {
    pub fn new(
        classifier: SentimentClassifier<S>,
        extractor: KeywordExtractor,
        top_n: usize,
        cloud_max_words: usize,
    ) -> Self {
        Self {
            classifier,
            extractor,
            top_n,
            cloud_max_words,
        }
    }

    /// Analyze multi-line input, one review per line
    pub fn analyze(&self, text: &str) -> Result<Analysis> {
        if text.trim().is_empty() {
            tracing::warn!("Analysis requested with empty input");
            return Err(AnalyzerError::EmptyInput);
        }
        self.analyze_reviews(split_reviews(text))
    }

    /// Analyze reviews that are already split; blank entries are skipped
    pub fn analyze_reviews(&self, reviews: Vec<String>) -> Result<Analysis> {
        let reviews: Vec<String> = reviews
            .into_iter()
            .filter(|r| !r.trim().is_empty())
            .collect();
        if reviews.is_empty() {
            return Err(AnalyzerError::EmptyInput);
        }

        let run_id = Uuid::new_v4();
        let results = self.classifier.classify_batch(&reviews);
        let summary = SentimentSummary::from_results(&results);
        let keywords = self.extractor.extract(&reviews, self.top_n);
        let cloud_words = word_frequencies(&reviews, self.cloud_max_words);

        tracing::info!(
            %run_id,
            reviews = summary.total,
            positive = summary.count(Sentiment::Positive),
            neutral = summary.count(Sentiment::Neutral),
            negative = summary.count(Sentiment::Negative),
            "Analysis complete"
        );

        Ok(Analysis {
            run_id,
            generated_at: Utc::now(),
            results,
            summary,
            keywords,
            cloud_words,
        })
    }

    /// Number of keywords this analyzer reports
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Same analyzer reporting at most `top_n` keywords
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

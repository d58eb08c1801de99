//! Review Sentiment Classification
//!
//! Turns a polarity score into one of three labels. Scoring sits behind the
//! [`PolarityScorer`] trait so the lexicon can be swapped without touching the
//! bucketing rules.

pub mod lexicon;


pub use lexicon::LexiconScorer;

use crate::config::ClassifierConfig;
use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Polarity strictly above this is Positive
pub const DEFAULT_POSITIVE_THRESHOLD: f64 = 0.1;

/// Polarity strictly below this is Negative
pub const DEFAULT_NEGATIVE_THRESHOLD: f64 = -0.1;

/// Anything that can rate text on a -1.0 (negative) to 1.0 (positive) scale.
///
/// Implementations must return 0.0 for empty text.
#[cfg_attr(test, mockall::automock)]
pub trait PolarityScorer {
    fn score_sentiment(&self, text: &str) -> f64;
}

/// Sentiment label of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Display order used by the summary and the charts
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Positive" => Ok(Sentiment::Positive),
            "Neutral" => Ok(Sentiment::Neutral),
            "Negative" => Ok(Sentiment::Negative),
            other => Err(AnalyzerError::InvalidLabel(other.to_string())),
        }
    }
}

/// Label boundaries on the polarity scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Thresholds {
    /// Bucket a polarity score
    pub fn label(&self, polarity: f64) -> Sentiment {
        if polarity > self.positive {
            Sentiment::Positive
        } else if polarity < self.negative {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: DEFAULT_POSITIVE_THRESHOLD,
            negative: DEFAULT_NEGATIVE_THRESHOLD,
        }
    }
}

impl From<&ClassifierConfig> for Thresholds {
    fn from(config: &ClassifierConfig) -> Self {
        Self {
            positive: config.positive_threshold,
            negative: config.negative_threshold,
        }
    }
}

/// Outcome of classifying one review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Review text as entered
    pub review: String,
    pub sentiment: Sentiment,
    /// Polarity score (-1.0 to 1.0)
    pub score: f64,
}

/// Classifies reviews using a polarity scorer and fixed thresholds
pub struct SentimentClassifier<S = LexiconScorer> {
    scorer: S,
    thresholds: Thresholds,
}

impl SentimentClassifier<LexiconScorer> {
    /// Lexicon scorer with the default ±0.1 thresholds
    pub fn with_defaults() -> Self {
        Self::new(LexiconScorer::new(), Thresholds::default())
    }
}

impl Default for SentimentClassifier<LexiconScorer> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<S: PolarityScorer> SentimentClassifier<S> {
    pub fn new(scorer: S, thresholds: Thresholds) -> Self {
        Self { scorer, thresholds }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Score raw review text and bucket the result
    pub fn classify(&self, text: &str) -> (Sentiment, f64) {
        let polarity = self.scorer.score_sentiment(text).clamp(-1.0, 1.0);
        (self.thresholds.label(polarity), polarity)
    }

    /// Classify one review into a result row
    pub fn classify_review(&self, review: &str) -> ClassificationResult {
        let (sentiment, score) = self.classify(review);
        tracing::debug!(%sentiment, score, "Classified review");
        ClassificationResult {
            review: review.to_string(),
            sentiment,
            score,
        }
    }

    /// Classify reviews, preserving input order
    pub fn classify_batch<T: AsRef<str>>(&self, reviews: &[T]) -> Vec<ClassificationResult> {
        reviews.iter().map(|r| self.classify_review(r.as_ref())).collect()
    }
}

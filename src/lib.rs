//! Product Review Sentiment Analyzer
//!
//! Classifies customer reviews as positive, neutral or negative, extracts the
//! most common keywords and renders the results as an HTML dashboard.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod keywords;
pub mod report;
pub mod sentiment;
pub mod server;
pub mod text;


pub use config::Config;
pub use error::{AnalyzerError, Result};
pub use report::{Analysis, Analyzer};
pub use sentiment::{ClassificationResult, Sentiment, SentimentClassifier};

//! Configuration management

use crate::error::{AnalyzerError, Result};
use crate::keywords::{DEFAULT_MIN_TOKEN_LEN, DEFAULT_STOP_WORDS, DEFAULT_TOP_N};
use crate::sentiment::{DEFAULT_NEGATIVE_THRESHOLD, DEFAULT_POSITIVE_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub classifier: ClassifierConfig,
    pub keywords: KeywordConfig,
    pub word_cloud: WordCloudConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Listening port
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Polarity strictly above this is Positive
    pub positive_threshold: f64,
    /// Polarity strictly below this is Negative
    pub negative_threshold: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Number of keywords shown in the bar chart
    pub top_n: usize,
    /// Tokens shorter than this are ignored
    pub min_token_len: usize,
    /// Tokens excluded from keyword counts
    pub stop_words: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WordCloudConfig {
    pub width: u32,
    pub height: u32,
    /// Maximum number of words placed on the canvas
    pub max_words: usize,
    /// Seed for the layout RNG, so the same input draws the same cloud
    pub seed: u64,
}

impl Config {
    /// Load configuration from file, layered with environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("REVIEW_ANALYZER")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("keywords.stop_words"),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations, falling back to built-in defaults
    pub fn load_default() -> anyhow::Result<Self> {
        let paths = [
            "config.toml",
            "config.yaml",
            "~/.config/review-analyzer/config.toml",
        ];

        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                tracing::debug!("Loading configuration from {}", expanded);
                return Self::load(expanded.as_ref());
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Self::load("config.toml")
    }

    /// Reject settings the analyzer cannot work with
    pub fn validate(&self) -> Result<()> {
        let c = &self.classifier;
        if !(-1.0..=1.0).contains(&c.positive_threshold)
            || !(-1.0..=1.0).contains(&c.negative_threshold)
        {
            return Err(AnalyzerError::Config(format!(
                "thresholds must lie in [-1, 1], got {} / {}",
                c.positive_threshold, c.negative_threshold
            )));
        }
        if c.positive_threshold < c.negative_threshold {
            return Err(AnalyzerError::Config(format!(
                "positive threshold {} is below negative threshold {}",
                c.positive_threshold, c.negative_threshold
            )));
        }
        if self.word_cloud.width == 0 || self.word_cloud.height == 0 {
            return Err(AnalyzerError::Config(
                "word cloud canvas must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            positive_threshold: DEFAULT_POSITIVE_THRESHOLD,
            negative_threshold: DEFAULT_NEGATIVE_THRESHOLD,
        }
    }
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            max_words: 200,
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.classifier.positive_threshold, 0.1);
        assert_eq!(config.classifier.negative_threshold, -0.1);
        assert_eq!(config.keywords.top_n, 15);
        assert_eq!(config.keywords.min_token_len, 3);
        assert!(config.keywords.stop_words.contains(&"the".to_string()));
        assert_eq!(config.word_cloud.width, 800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = Config::default();
        config.classifier.positive_threshold = -0.2;
        config.classifier.negative_threshold = 0.2;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("below negative threshold"));
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let mut config = Config::default();
        config.classifier.positive_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_canvas_rejected() {
        let mut config = Config::default();
        config.word_cloud.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("does-not-exist.toml").unwrap();
        assert_eq!(config.keywords.top_n, DEFAULT_TOP_N);
    }

    #[test]
    fn test_example_config_parses() {
        let text = include_str!("../config.example.toml");
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.keywords.top_n, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("[classifier]\npositive_threshold = 0.25\n").unwrap();
        assert_eq!(config.classifier.positive_threshold, 0.25);
        assert_eq!(config.classifier.negative_threshold, -0.1);
        assert_eq!(config.server.host, "127.0.0.1");
    }
}

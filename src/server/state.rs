use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::dashboard::WordCloud;
use crate::report::Analyzer;

pub type SharedAnalyzer = Arc<Analyzer>;
pub type SharedWordCloud = Arc<WordCloud>;

/// Read-only state shared by all handlers
#[derive(Clone)]
pub struct ServerState {
    pub start_time: Instant,
    pub analyzer: SharedAnalyzer,
    pub word_cloud: SharedWordCloud,
}

impl ServerState {
    pub fn new(analyzer: Analyzer, word_cloud: WordCloud) -> Self {
        Self {
            start_time: Instant::now(),
            analyzer: Arc::new(analyzer),
            word_cloud: Arc::new(word_cloud),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Analyzer::from_config(config),
            WordCloud::from_config(&config.word_cloud),
        )
    }
}

impl FromRef<ServerState> for SharedAnalyzer {
    fn from_ref(input: &ServerState) -> Self {
        input.analyzer.clone()
    }
}

impl FromRef<ServerState> for SharedWordCloud {
    fn from_ref(input: &ServerState) -> Self {
        input.word_cloud.clone()
    }
}

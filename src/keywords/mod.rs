//! Keyword extraction
//!
//! Frequency counting over normalized review text. Counting keeps tokens in
//! first-seen order and ranks with a stable sort, so equal counts come out in
//! the order they first appeared in the reviews.


use crate::config::KeywordConfig;
use crate::text::{clean_text, word_runs};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Number of keywords returned when the caller does not ask for a limit
pub const DEFAULT_TOP_N: usize = 15;

/// Tokens shorter than this are never keywords
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;

/// Tokens excluded from keyword counts
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "is", "and", "or", "but", "in", "on", "at", "to", "for", "of", "a", "an", "it", "was",
    "this", "that", "with", "as", "by", "from", "be", "are",
];

/// Common English words left out of the word cloud
pub const CLOUD_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "else", "ever",
    "few", "for", "from", "further", "get", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into", "is",
    "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "of",
    "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours", "ourselves",
    "out", "over", "own", "same", "shall", "she", "should", "so", "some", "such", "than", "that",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "with", "would", "you", "your",
    "yours", "yourself", "yourselves", "don't", "it's", "i'm", "i've", "can't", "won't",
    "didn't", "doesn't", "isn't", "wasn't",
];

/// A token and how many times it occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub token: String,
    pub frequency: usize,
}

/// Insertion-ordered frequency table
#[derive(Debug, Clone, Default)]
struct FrequencyCounter {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyCounter {
    fn add(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), 1));
            }
        }
    }

    fn count(&self, token: &str) -> Option<usize> {
        self.index.get(token).map(|&slot| self.entries[slot].1)
    }

    /// Sum of all counts
    fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Overwrite a count, appending the token if it is new
    fn set(&mut self, token: &str, count: usize) {
        match self.index.get(token) {
            Some(&slot) => self.entries[slot].1 = count,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), count));
            }
        }
    }

    fn subtract(&mut self, token: &str, n: usize) {
        if let Some(&slot) = self.index.get(token) {
            self.entries[slot].1 = self.entries[slot].1.saturating_sub(n);
        }
    }

    /// Token as it is stored after plural folding
    fn canonical<'a>(&self, token: &'a str) -> &'a str {
        match singular_of(token) {
            Some(singular) if self.count(token).is_none() && self.count(singular).is_some() => {
                singular
            }
            _ => token,
        }
    }

    /// Drop tokens whose count fell to zero
    fn drop_empty(&mut self) {
        self.entries.retain(|(_, count)| *count > 0);
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(slot, (token, _))| (token.clone(), slot))
            .collect();
    }

    /// Fold plural forms into their singular when both were seen
    fn merge_plurals(mut self) -> Self {
        let mut folded: HashMap<String, usize> = HashMap::new();
        for (token, count) in &self.entries {
            if let Some(singular) = singular_of(token) {
                if self.count(singular).is_some() {
                    *folded.entry(singular.to_string()).or_insert(0) += count;
                }
            }
        }

        if folded.is_empty() {
            return self;
        }

        self.entries
            .retain(|(token, _)| !singular_of(token).is_some_and(|s| folded.contains_key(s)));
        for (token, count) in self.entries.iter_mut() {
            if let Some(extra) = folded.get(token.as_str()) {
                *count += extra;
            }
        }
        self.reindex();
        self
    }

    fn most_common(mut self, n: usize) -> Vec<KeywordCount> {
        // stable: ties keep first-seen order
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries
            .into_iter()
            .take(n)
            .map(|(token, frequency)| KeywordCount { token, frequency })
            .collect()
    }
}

/// Naive singular of an English plural ("reviews" -> "review")
fn singular_of(token: &str) -> Option<&str> {
    if token.len() > 3 && token.ends_with('s') && !token.ends_with("ss") {
        Some(&token[..token.len() - 1])
    } else {
        None
    }
}

/// Extracts the most frequent meaningful tokens from a set of reviews
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stop_words: HashSet<String>,
    min_token_len: usize,
}

impl KeywordExtractor {
    pub fn new<I, W>(stop_words: I, min_token_len: usize) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        Self {
            stop_words: stop_words.into_iter().map(Into::into).collect(),
            min_token_len,
        }
    }

    pub fn from_config(config: &KeywordConfig) -> Self {
        Self::new(config.stop_words.iter().cloned(), config.min_token_len)
    }

    /// True when the token survives the length and stop-word filters
    pub fn is_keyword(&self, token: &str) -> bool {
        token.len() >= self.min_token_len && !self.stop_words.contains(token)
    }

    /// Top `top_n` keywords across all reviews, most frequent first
    pub fn extract<T: AsRef<str>>(&self, reviews: &[T], top_n: usize) -> Vec<KeywordCount> {
        let mut counter = FrequencyCounter::default();

        for review in reviews {
            let cleaned = clean_text(review.as_ref());
            for token in cleaned.split_whitespace().filter(|t| self.is_keyword(t)) {
                counter.add(token);
            }
        }

        counter.most_common(top_n)
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS.iter().copied(), DEFAULT_MIN_TOKEN_LEN)
    }
}

/// Top keywords using the default stop words and length filter
pub fn extract_keywords<T: AsRef<str>>(reviews: &[T], top_n: usize) -> Vec<KeywordCount> {
    KeywordExtractor::default().extract(reviews, top_n)
}

/// Log-likelihood above which a word pair counts as a collocation
pub const COLLOCATION_THRESHOLD: f64 = 30.0;

fn binomial_log_likelihood(k: f64, n: f64, x: f64) -> f64 {
    x.max(1e-10).ln() * k + (1.0 - x).max(1e-10).ln() * (n - k)
}

/// Dunning log-likelihood ratio that `first second` occur together more
/// often than chance
fn collocation_score(pair: usize, first: usize, second: usize, total: usize) -> f64 {
    let (c12, c1, c2, n) = (pair as f64, first as f64, second as f64, total as f64);
    let p = c2 / n;
    let p1 = c12 / c1;
    let p2 = (c2 - c12) / (n - c1);

    -2.0 * (binomial_log_likelihood(c12, c1, p) + binomial_log_likelihood(c2 - c12, n - c1, p)
        - binomial_log_likelihood(c12, c1, p1)
        - binomial_log_likelihood(c2 - c12, n - c1, p2))
}

/// Cloud tokens of one review, stop words included
fn cloud_tokens(review: &str) -> impl Iterator<Item = String> + '_ {
    word_runs(review).into_iter().filter_map(|run| {
        let mut word = run.to_lowercase();
        if word.ends_with("'s") {
            word.truncate(word.len() - 2);
        }
        let word = word.trim_end_matches('\'');
        if word.is_empty() || word.chars().all(|c| c.is_ascii_digit()) {
            None
        } else {
            Some(word.to_string())
        }
    })
}

/// Word frequencies for the word cloud, taken from the raw review text.
///
/// Words are matched as a word character followed by word characters or
/// apostrophes, lowercased, stripped of a trailing possessive `'s`, and
/// numbers and common English words are dropped. Plurals fold into their
/// singular when both occur.
///
/// Adjacent non-stop-word pairs scoring above [`COLLOCATION_THRESHOLD`] are
/// kept as two-word phrases; their occurrences are taken off the counts of
/// the single words.
pub fn word_frequencies<T: AsRef<str>>(reviews: &[T], max_words: usize) -> Vec<KeywordCount> {
    let stop_words: HashSet<&str> = CLOUD_STOP_WORDS.iter().copied().collect();
    let is_stop = |word: &str| stop_words.contains(word);

    // pairs span review boundaries, as in the concatenated text
    let words: Vec<String> = reviews
        .iter()
        .flat_map(|review| cloud_tokens(review.as_ref()))
        .collect();

    let mut unigrams = FrequencyCounter::default();
    for word in words.iter().filter(|w| !is_stop(w.as_str())) {
        unigrams.add(word);
    }
    let mut bigrams = FrequencyCounter::default();
    for pair in words.windows(2) {
        if !is_stop(pair[0].as_str()) && !is_stop(pair[1].as_str()) {
            bigrams.add(&format!("{} {}", pair[0], pair[1]));
        }
    }

    let total = unigrams.total();
    let unigrams = unigrams.merge_plurals();
    let bigrams = bigrams.merge_plurals();

    let mut counts = unigrams.clone();
    for (phrase, count) in &bigrams.entries {
        let Some((first, second)) = phrase.split_once(' ') else {
            continue;
        };
        let first = unigrams.canonical(first);
        let second = unigrams.canonical(second);
        let (Some(c1), Some(c2)) = (unigrams.count(first), unigrams.count(second)) else {
            continue;
        };

        if collocation_score(*count, c1, c2, total) > COLLOCATION_THRESHOLD {
            counts.subtract(first, *count);
            counts.subtract(second, *count);
            counts.set(phrase, *count);
        }
    }
    counts.drop_empty();

    counts.most_common(max_words)
}

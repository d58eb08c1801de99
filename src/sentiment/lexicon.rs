//! Lexicon-based polarity scorer
//!
//! Word-level polarity lookup tuned for product reviews, with intensity
//! modifiers, negation handling and emoji scores. The polarity of a text is
//! the mean of every matched term, so a single strong word dominates a short
//! review but is diluted in a long, mixed one.

use super::PolarityScorer;
use crate::text::clean_word;
use std::collections::HashMap;

/// How many preceding words may modify a sentiment term
const MODIFIER_WINDOW: usize = 3;

/// Score multiplier applied when a negation precedes a term
const NEGATION_FACTOR: f64 = -0.5;

/// Polarity scorer using a fixed product-review lexicon
pub struct LexiconScorer {
    /// Word-level polarity (-1.0 to 1.0)
    lexicon: HashMap<String, f64>,
    /// Emoji polarity
    emoji_lexicon: HashMap<char, f64>,
    /// Intensity modifiers (very, extremely, slightly, etc.)
    boosters: HashMap<String, f64>,
    /// Negation words
    negations: Vec<String>,
}

impl LexiconScorer {
    /// Create a new scorer with the default lexicons
    pub fn new() -> Self {
        let mut scorer = Self {
            lexicon: HashMap::new(),
            emoji_lexicon: HashMap::new(),
            boosters: HashMap::new(),
            negations: Vec::new(),
        };
        scorer.init_lexicons();
        scorer
    }

    fn init_lexicons(&mut self) {
        let positive_words = [
            ("good", 0.7),
            ("great", 0.8),
            ("excellent", 1.0),
            ("amazing", 0.6),
            ("awesome", 1.0),
            ("fantastic", 0.4),
            ("wonderful", 1.0),
            ("best", 1.0),
            ("perfect", 1.0),
            ("superb", 1.0),
            ("outstanding", 0.5),
            ("love", 0.5),
            ("loved", 0.7),
            ("loves", 0.5),
            ("lovely", 0.5),
            ("nice", 0.6),
            ("happy", 0.8),
            ("glad", 0.5),
            ("pleased", 0.5),
            ("delighted", 0.7),
            ("satisfied", 0.5),
            ("impressed", 0.6),
            ("enjoy", 0.4),
            ("enjoyed", 0.4),
            ("recommend", 0.4),
            ("recommended", 0.4),
            ("worth", 0.3),
            ("fine", 0.42),
            ("okay", 0.5),
            ("ok", 0.5),
            ("decent", 0.17),
            ("fast", 0.2),
            ("quick", 0.33),
            ("easy", 0.43),
            ("smooth", 0.4),
            ("comfortable", 0.4),
            ("soft", 0.1),
            ("beautiful", 0.85),
            ("gorgeous", 0.7),
            ("sturdy", 0.3),
            ("solid", 0.3),
            ("durable", 0.3),
            ("reliable", 0.3),
            ("helpful", 0.5),
            ("friendly", 0.38),
            ("affordable", 0.3),
            ("special", 0.36),
            ("exactly", 0.25),
            ("exceeded", 0.3),
        ];

        let negative_words = [
            ("bad", -0.7),
            ("terrible", -1.0),
            ("awful", -1.0),
            ("horrible", -1.0),
            ("worst", -1.0),
            ("poor", -0.4),
            ("hate", -0.8),
            ("hated", -0.8),
            ("disappointed", -0.75),
            ("disappointing", -0.6),
            ("broken", -0.4),
            ("broke", -0.3),
            ("damaged", -0.4),
            ("defective", -0.6),
            ("faulty", -0.5),
            ("flimsy", -0.4),
            ("useless", -0.5),
            ("waste", -0.2),
            ("fake", -0.5),
            ("slow", -0.3),
            ("late", -0.3),
            ("average", -0.15),
            ("overpriced", -0.5),
            ("expensive", -0.5),
            ("rude", -0.6),
            ("dirty", -0.6),
            ("ugly", -0.7),
            ("annoying", -0.8),
            ("frustrating", -0.4),
            ("uncomfortable", -0.5),
            ("unhappy", -0.6),
            ("sad", -0.5),
            ("wrong", -0.5),
            ("missing", -0.2),
        ];

        for (word, score) in positive_words.iter().chain(negative_words.iter()) {
            self.lexicon.insert(word.to_string(), *score);
        }

        let emojis = [
            ('👍', 0.5),
            ('❤', 0.6),
            ('😍', 0.8),
            ('😊', 0.6),
            ('🙂', 0.4),
            ('😀', 0.6),
            ('⭐', 0.3),
            ('🔥', 0.5),
            ('✅', 0.4),
            ('👎', -0.5),
            ('❌', -0.4),
            ('😡', -0.8),
            ('😠', -0.7),
            ('😞', -0.6),
            ('😢', -0.5),
            ('🙁', -0.4),
            ('💩', -0.7),
            ('🤮', -0.8),
        ];

        for (emoji, score) in emojis {
            self.emoji_lexicon.insert(emoji, score);
        }

        let boosters = [
            ("very", 1.3),
            ("really", 1.3),
            ("extremely", 1.5),
            ("absolutely", 1.4),
            ("completely", 1.4),
            ("totally", 1.3),
            ("so", 1.2),
            ("super", 1.3),
            ("incredibly", 1.4),
            ("highly", 1.3),
            ("truly", 1.2),
            ("somewhat", 0.7),
            ("slightly", 0.5),
        ];

        for (word, factor) in boosters {
            self.boosters.insert(word.to_string(), factor);
        }

        self.negations = [
            "not", "no", "never", "none", "neither", "nobody", "nothing", "nowhere", "isn't",
            "aren't", "wasn't", "weren't", "hasn't", "haven't", "hadn't", "doesn't", "don't",
            "didn't", "won't", "wouldn't", "can't", "cannot", "couldn't", "shouldn't",
        ]
        .iter()
        .map(|w| w.to_string())
        .collect();
    }

    /// Polarity of text in [-1.0, 1.0]; 0.0 when no term is recognized
    pub fn polarity(&self, text: &str) -> f64 {
        let words = Self::words(text);

        let mut scores: Vec<f64> = Vec::new();

        for c in text.chars() {
            if let Some(&score) = self.emoji_lexicon.get(&c) {
                scores.push(score);
            }
        }

        for (i, word) in words.iter().enumerate() {
            if let Some(&score) = self.lexicon.get(word) {
                scores.push(self.apply_modifiers(&words, i, score));
            }
        }

        if scores.is_empty() {
            return 0.0;
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }

    /// Lowercased words with punctuation trimmed; curly apostrophes count as straight
    fn words(text: &str) -> Vec<String> {
        text.to_lowercase()
            .replace('\u{2019}', "'")
            .split_whitespace()
            .map(clean_word)
            .collect()
    }

    /// Apply boosters and negations from the preceding words to a score
    fn apply_modifiers(&self, words: &[String], index: usize, mut score: f64) -> f64 {
        let start = index.saturating_sub(MODIFIER_WINDOW);

        for prev_word in &words[start..index] {
            if let Some(&factor) = self.boosters.get(prev_word) {
                score *= factor;
            }

            if self.negations.contains(prev_word) {
                score *= NEGATION_FACTOR;
            }
        }

        score.clamp(-1.0, 1.0)
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconScorer {
    fn score_sentiment(&self, text: &str) -> f64 {
        self.polarity(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_review() {
        let scorer = LexiconScorer::new();
        let polarity = scorer.polarity("Great product! Loved the quality and fast delivery.");
        assert!(polarity > 0.1);
    }

    #[test]
    fn test_negative_review() {
        let scorer = LexiconScorer::new();
        let polarity = scorer.polarity("Terrible experience. Product broke after 2 days.");
        assert!(polarity < -0.1);
    }

    #[test]
    fn test_no_recognized_terms() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.polarity("The package arrived on Tuesday."), 0.0);
        assert_eq!(scorer.polarity("1234 !!! ###"), 0.0);
    }

    #[test]
    fn test_empty_text() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.polarity(""), 0.0);
        assert_eq!(scorer.polarity("   "), 0.0);
    }

    #[test]
    fn test_mean_of_terms() {
        let scorer = LexiconScorer::new();
        // good 0.7, slow -0.3
        let polarity = scorer.polarity("Good quality but delivery was slow.");
        assert!((polarity - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_booster_words() {
        let scorer = LexiconScorer::new();

        let normal = scorer.polarity("This is good");
        let boosted = scorer.polarity("This is extremely good");

        assert!(boosted > normal);
        assert!(boosted <= 1.0);
    }

    #[test]
    fn test_dampener_words() {
        let scorer = LexiconScorer::new();

        let normal = scorer.polarity("The fit is uncomfortable");
        let damped = scorer.polarity("The fit is slightly uncomfortable");

        assert!(damped < 0.0);
        assert!(damped > normal);
    }

    #[test]
    fn test_negation() {
        let scorer = LexiconScorer::new();

        let positive = scorer.polarity("This is good");
        let negated = scorer.polarity("This is not good");

        assert!(positive > 0.0);
        assert!(negated < 0.0);
    }

    #[test]
    fn test_negation_contraction() {
        let scorer = LexiconScorer::new();
        assert!(scorer.polarity("I don't recommend it") < 0.0);
        assert!(scorer.polarity("I don\u{2019}t recommend it") < 0.0);
    }

    #[test]
    fn test_negation_window() {
        let scorer = LexiconScorer::new();
        // "not" is four words before "good", out of reach
        assert!(scorer.polarity("Not what I expected, good anyway") > 0.0);
    }

    #[test]
    fn test_emoji_sentiment() {
        let scorer = LexiconScorer::new();
        assert!(scorer.polarity("👍👍") > 0.1);
        assert!(scorer.polarity("arrived 👎") < -0.1);
    }

    #[test]
    fn test_polarity_is_bounded() {
        let scorer = LexiconScorer::new();
        let polarity = scorer.polarity("Absolutely extremely really perfect excellent best");
        assert!(polarity <= 1.0);
        let polarity = scorer.polarity("Extremely very terrible awful worst");
        assert!(polarity >= -1.0);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.polarity("GREAT!!!"), scorer.polarity("great"));
    }

    #[test]
    fn test_curly_apostrophe_negation() {
        let scorer = LexiconScorer::new();
        let curly = scorer.polarity("It isn\u{2019}t good");
        assert_eq!(curly, scorer.polarity("It isn't good"));
        assert!(curly < 0.0);
    }

    #[test]
    fn test_trait_delegates_to_polarity() {
        let scorer = LexiconScorer::default();
        let text = "Excellent quality and great customer service!";
        assert_eq!(scorer.score_sentiment(text), scorer.polarity(text));
    }
}

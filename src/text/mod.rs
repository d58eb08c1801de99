//! Text normalization
//!
//! Shared by the keyword extractor and the word cloud. The sentiment scorer
//! sees raw text so it can still read emojis and negation contractions.

/// Lowercase the text, then drop everything except ASCII letters and whitespace
pub fn clean_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect()
}

/// Clean a single word, keeping apostrophes and hyphens
pub fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '-')
        .collect::<String>()
        .to_lowercase()
}

/// Split text into word-like runs: a word character followed by word
/// characters or apostrophes
pub fn word_runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        let is_word = c.is_alphanumeric() || c == '_';
        match start {
            None if is_word => start = Some(i),
            Some(_) if is_word || c == '\'' => {}
            Some(s) => {
                runs.push(&text[s..i]);
                start = None;
            }
            None => {}
        }
    }
    if let Some(s) = start {
        runs.push(&text[s..]);
    }

    runs
}

//! Text normalisation: tokenize, filter, lemmatize, build n-grams.
//!
//! A research statement becomes an ordered term sequence: every unigram,
//! then every bigram, then every trigram over the filtered and lemmatized
//! tokens. Repeats are kept because term frequency is the ranking signal.

pub mod lemma;
pub mod stopwords;

use std::collections::{HashMap, HashSet};

use self::lemma::lemmatize;
use self::stopwords::ENGLISH_STOPWORDS;

/// Tokens shorter than this (in characters) are dropped.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Largest n-gram size in a term sequence.
pub const MAX_NGRAM: usize = 3;

/// Split text into lowercase runs of word characters (`[\w]+`).
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_word_char(c))
        .filter(|run| !run.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Word characters: letters, digits and underscore, Unicode-aware.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Every contiguous window of `n` tokens, joined with single spaces.
///
/// Returns an empty sequence when `n` is 0 or exceeds the token count.
pub fn ngrams(tokens: &[String], n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    tokens.windows(n).map(|window| window.join(" ")).collect()
}

/// Unigrams, then bigrams, then trigrams over `tokens`.
///
/// For `L >= 2` tokens the result has `3L - 3` entries.
pub fn term_sequence(tokens: &[String]) -> Vec<String> {
    (1..=MAX_NGRAM).flat_map(|n| ngrams(tokens, n)).collect()
}

/// Stopword-filtering, lemmatizing normaliser.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: HashSet<String>,
    min_token_chars: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_stopwords(ENGLISH_STOPWORDS.iter().copied())
    }
}

impl Normalizer {
    /// Build a normaliser with a custom stopword set.
    pub fn with_stopwords<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
            min_token_chars: MIN_TOKEN_CHARS,
        }
    }

    /// Tokenize, drop stopwords and short tokens, lemmatize. Order is preserved.
    ///
    /// A lemma that itself lands on a stopword or under the length floor is
    /// dropped too, so `interests` and `interest` filter the same way.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .filter(|token| self.keeps(token))
            .map(|token| lemmatize(&token))
            .filter(|lemma| self.keeps(lemma))
            .collect()
    }

    /// Full term sequence for a document: `term_sequence(normalize(text))`.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        term_sequence(&self.normalize(text))
    }

    /// Term counts for a document, sorted by descending count then term.
    pub fn term_counts(&self, text: &str) -> Vec<(String, u32)> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for term in self.analyze(text) {
            *counts.entry(term).or_insert(0) += 1;
        }
        let mut counts: Vec<(String, u32)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    fn keeps(&self, token: &str) -> bool {
        token.chars().count() >= self.min_token_chars && !self.stopwords.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_owned()).collect()
    }

    #[test]
    fn tokenize_splits_on_non_word_runs() {
        assert_eq!(
            tokenize("Cell-membrane   transport, (ATP_ase) 2024!"),
            strings(&["cell", "membrane", "transport", "atp_ase", "2024"])
        );
    }

    #[test]
    fn tokenize_empty_and_punctuation_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" -- ... !!").is_empty());
    }

    #[test]
    fn normalize_drops_stopwords_and_short_tokens() {
        let n = Normalizer::default();
        assert_eq!(
            n.normalize("The lab of Dr. Li studies how ion channels work in DNA repair"),
            strings(&["lab", "study", "ion", "channel", "work", "dna", "repair"])
        );
    }

    #[test]
    fn normalize_preserves_order_and_repeats() {
        let n = Normalizer::default();
        assert_eq!(
            n.normalize("proteins fold; protein folds"),
            strings(&["protein", "fold", "protein", "fold"])
        );
    }

    #[test]
    fn lemma_landing_on_stopword_is_dropped() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("research interests"), strings(&["research"]));
    }

    #[test]
    fn custom_stopwords_replace_default_set() {
        let n = Normalizer::with_stopwords(["Cell"]);
        assert_eq!(n.normalize("the cell"), strings(&["the"]));
    }

    #[test]
    fn ngram_windows() {
        let tokens = strings(&["cell", "membrane", "transport"]);
        assert_eq!(ngrams(&tokens, 1), tokens);
        assert_eq!(
            ngrams(&tokens, 2),
            strings(&["cell membrane", "membrane transport"])
        );
        assert_eq!(ngrams(&tokens, 3), strings(&["cell membrane transport"]));
        assert!(ngrams(&tokens, 4).is_empty());
        assert!(ngrams(&tokens, 0).is_empty());
    }

    #[test]
    fn ngram_count_law() {
        for len in 1..12 {
            let tokens: Vec<String> = (0..len).map(|i| format!("tok{i}")).collect();
            assert_eq!(ngrams(&tokens, 1).len(), len);
            assert_eq!(ngrams(&tokens, 2).len(), len.saturating_sub(1));
            assert_eq!(ngrams(&tokens, 3).len(), len.saturating_sub(2));
            if len >= 2 {
                assert_eq!(term_sequence(&tokens).len(), 3 * len - 3);
            }
        }
    }

    #[test]
    fn term_sequence_orders_unigrams_first() {
        let tokens = strings(&["cell", "membrane", "transport"]);
        assert_eq!(
            term_sequence(&tokens),
            strings(&[
                "cell",
                "membrane",
                "transport",
                "cell membrane",
                "membrane transport",
                "cell membrane transport",
            ])
        );
    }

    #[test]
    fn term_counts_keep_frequency() {
        let n = Normalizer::default();
        let counts = n.term_counts("protein protein folding");
        assert_eq!(counts[0], ("protein".to_owned(), 2));
        assert!(counts.contains(&("protein folding".to_owned(), 1)));
        assert!(counts.contains(&("protein protein folding".to_owned(), 1)));
    }
}

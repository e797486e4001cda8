//! Sentence candidates from formatted text
//!
//! Formatted batches are cut into short word groups of random length.
//! A group becomes a sentence only when it still carries a dialectic
//! marker after filtering.

use crate::config::GeneratorConfig;
use dialectic_core::Profile;
use rand::Rng;
use std::sync::Arc;

/// Cuts formatted text into accepted sentence candidates
#[derive(Debug, Clone)]
pub struct Chunker {
    profile: Arc<Profile>,
    max_word_len: usize,
    min_words: usize,
    max_words: usize,
}

impl Chunker {
    /// Create a chunker with the word limits of `config`
    pub fn new(profile: Arc<Profile>, config: &GeneratorConfig) -> Self {
        Self {
            profile,
            max_word_len: config.max_word_len,
            min_words: config.min_words.max(1),
            max_words: config.max_words.max(config.min_words.max(1)),
        }
    }

    /// Consume the word stream of `text` greedily.
    ///
    /// Words with `max_word_len` characters or more are discarded first.
    /// Each step draws a group size from `[min_words, max_words]`, takes that
    /// many words and advances past them; the walk stops when fewer words
    /// remain than the drawn size. Rejected groups are dropped silently.
    pub fn split_candidates<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Vec<String> {
        let words: Vec<&str> = text
            .split_whitespace()
            .filter(|word| word.chars().count() < self.max_word_len)
            .collect();

        let mut accepted = Vec::new();
        let mut cursor = 0;
        while cursor < words.len() {
            let size = rng.gen_range(self.min_words..=self.max_words);
            if words.len() - cursor < size {
                break;
            }

            let candidate = words[cursor..cursor + size].join(" ");
            cursor += size;

            if let Some(sentence) = self.accept(&candidate) {
                accepted.push(sentence);
            }
        }
        accepted
    }

    /// Filter a candidate to the output alphabet and check it for markers.
    ///
    /// Pause markers left dangling at either end are trimmed.
    pub fn accept(&self, candidate: &str) -> Option<String> {
        let filtered: String = candidate
            .chars()
            .filter(|&ch| self.profile.is_output_char(ch))
            .collect();

        let short = self.profile.short_pause();
        let long = self.profile.long_pause();
        let is_pause = |word: &&str| *word == short || *word == long;

        let mut words: Vec<&str> = filtered.split_whitespace().collect();
        while words.first().is_some_and(is_pause) {
            words.remove(0);
        }
        while words.last().is_some_and(is_pause) {
            words.pop();
        }
        if words.is_empty() {
            return None;
        }

        let sentence = words.join(" ");
        self.has_marker(&sentence).then_some(sentence)
    }

    /// Whether `sentence` carries a dialectic marker.
    ///
    /// The softness marker only counts between a paired consonant and a
    /// soft vowel, so a source apostrophe used as a quote does not qualify.
    fn has_marker(&self, sentence: &str) -> bool {
        let softness = self.profile.softness_marker();
        let chars: Vec<char> = sentence.chars().collect();

        chars.iter().enumerate().any(|(i, &ch)| {
            if !self.profile.is_acceptance_marker(ch) {
                return false;
            }
            if ch != softness {
                return true;
            }
            let after_paired = i > 0 && self.profile.is_paired_consonant(chars[i - 1]);
            let before_soft = chars
                .get(i + 1)
                .is_some_and(|&next| self.profile.is_soft_vowel(next));
            after_paired && before_soft
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chunker(min: usize, max: usize) -> Chunker {
        let config = GeneratorConfig {
            min_words: min,
            max_words: max,
            max_word_len: 10,
            ..GeneratorConfig::default()
        };
        Chunker::new(Profile::russian().unwrap(), &config)
    }

    #[test]
    fn test_accept_requires_marker() {
        let c = chunker(2, 4);
        assert_eq!(c.accept("кот спит"), None);
        assert_eq!(
            c.accept("ко\u{301}т спит"),
            Some("ко\u{301}т спит".to_string())
        );
        assert_eq!(c.accept("jама там"), Some("jама там".to_string()));
        assert_eq!(c.accept("м'ята"), Some("м'ята".to_string()));
    }

    #[test]
    fn test_quote_apostrophe_is_not_a_marker() {
        let c = chunker(2, 4);
        assert_eq!(c.accept("'кот' спит"), None);
        assert_eq!(c.accept("' да '"), None);
        assert_eq!(
            c.accept("'кот' с'идит"),
            Some("'кот' с'идит".to_string())
        );
    }

    #[test]
    fn test_accept_filters_and_trims_pauses() {
        let c = chunker(2, 4);
        assert_eq!(
            c.accept("// ко\u{301}т / cat //"),
            Some("ко\u{301}т".to_string())
        );
        assert_eq!(c.accept("/ //"), None);
        assert_eq!(c.accept("hello world"), None);
    }

    #[test]
    fn test_fixed_group_size() {
        let c = chunker(2, 2);
        let mut rng = StdRng::seed_from_u64(7);
        let text = "а\u{301} б в\u{301} г д е";
        assert_eq!(
            c.split_candidates(text, &mut rng),
            vec!["а\u{301} б", "в\u{301} г"]
        );
    }

    #[test]
    fn test_long_words_discarded_before_grouping() {
        let c = chunker(1, 1);
        let mut rng = StdRng::seed_from_u64(1);
        let text = "о\u{301}чень-о\u{301}чень-длинное ко\u{301}т";
        assert_eq!(c.split_candidates(text, &mut rng), vec!["ко\u{301}т"]);
    }

    #[test]
    fn test_groups_respect_bounds_and_seed() {
        let c = chunker(2, 4);
        let text = (0..200)
            .map(|i| format!("сло\u{301}во{i}"))
            .collect::<Vec<_>>()
            .join(" ");

        let first = c.split_candidates(&text, &mut StdRng::seed_from_u64(42));
        let second = c.split_candidates(&text, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
        assert!(!first.is_empty());
        for sentence in &first {
            let words = sentence.split(' ').count();
            assert!((2..=4).contains(&words), "{sentence:?}");
        }
    }
}

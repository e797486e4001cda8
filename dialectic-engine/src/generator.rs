//! Generation rounds and deduplication
//!
//! Each round fetches one article, renders its paragraphs, packs them into
//! accentor-sized batches, formats every batch and cuts the result into
//! sentence candidates. Rounds repeat until enough unique sentences exist.

use crate::{
    accentor::Accentor,
    batcher::ParagraphBatcher,
    chunker::Chunker,
    config::GeneratorConfig,
    error::{EngineError, Result},
    executor::render_paragraphs,
    formatter::PhonologicalFormatter,
    source::ArticleSource,
};
use dialectic_core::ParagraphProcessor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;

/// Drives generation rounds against an article source
#[derive(Debug)]
pub struct Generator<R = StdRng> {
    config: GeneratorConfig,
    processor: ParagraphProcessor,
    batcher: ParagraphBatcher,
    formatter: PhonologicalFormatter,
    chunker: Chunker,
    rng: R,
}

impl Generator<StdRng> {
    /// Create a generator seeded from system entropy
    pub fn new(config: GeneratorConfig, accentor: Arc<dyn Accentor>) -> Result<Self> {
        Self::with_rng(config, accentor, StdRng::from_entropy())
    }

    /// Create a reproducible generator
    pub fn with_seed(config: GeneratorConfig, accentor: Arc<dyn Accentor>, seed: u64) -> Result<Self> {
        Self::with_rng(config, accentor, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Generator<R> {
    /// Create a generator drawing group sizes from `rng`
    pub fn with_rng(config: GeneratorConfig, accentor: Arc<dyn Accentor>, rng: R) -> Result<Self> {
        config.validate()?;
        let profile = config.load_profile()?;

        let formatter =
            PhonologicalFormatter::new(profile.clone(), accentor)?.with_options(config.format);

        Ok(Self {
            processor: ParagraphProcessor::new(profile.clone()),
            batcher: ParagraphBatcher::new(config.batch_char_budget),
            chunker: Chunker::new(profile, &config),
            formatter,
            config,
            rng,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Collect exactly `amount` unique sentences.
    ///
    /// Source failures end generation immediately. When `max_idle_rounds`
    /// is set, that many consecutive rounds without a new sentence end it
    /// with [`EngineError::SourceExhausted`].
    pub fn generate(
        &mut self,
        source: &mut dyn ArticleSource,
        amount: usize,
    ) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut sentences = Vec::with_capacity(amount);
        let mut idle_rounds = 0;
        let mut round = 0;

        while sentences.len() < amount {
            round += 1;
            let paragraphs = source.fetch_random()?;

            let before = sentences.len();
            for candidate in self.round(&paragraphs) {
                if seen.insert(candidate.clone()) {
                    sentences.push(candidate);
                }
            }
            let added = sentences.len() - before;
            log::debug!(
                "Round {round}: {} paragraphs, {added} new sentences ({}/{amount})",
                paragraphs.len(),
                sentences.len()
            );

            if added > 0 {
                idle_rounds = 0;
                continue;
            }
            idle_rounds += 1;
            if let Some(limit) = self.config.max_idle_rounds {
                if idle_rounds >= limit {
                    return Err(EngineError::SourceExhausted {
                        rounds: idle_rounds,
                        collected: sentences.len(),
                    });
                }
            }
        }

        sentences.truncate(amount);
        log::info!("Generated {} sentences in {round} rounds", sentences.len());
        Ok(sentences)
    }

    /// Accepted candidates from one article's paragraphs, in order
    pub fn round(&mut self, paragraphs: &[String]) -> Vec<String> {
        let rendered = render_paragraphs(
            &self.processor,
            paragraphs,
            self.config.execution_mode,
            self.config.parallel_threshold,
        );

        let mut candidates = Vec::new();
        for batch in self.batcher.batch(&rendered) {
            let formatted = self.formatter.format(&batch);
            if formatted.is_empty() {
                log::debug!(
                    "Batch of {} characters produced no text",
                    batch.chars().count()
                );
                continue;
            }
            candidates.extend(self.chunker.split_candidates(&formatted, &mut self.rng));
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AccentError, SourceError};
    use crate::executor::ExecutionMode;

    /// Stresses the first vowel of every word
    fn first_vowel() -> Arc<dyn Accentor> {
        Arc::new(|text: &str| -> std::result::Result<String, AccentError> {
            Ok(text
                .split(' ')
                .map(|word| match word.char_indices().find(|(_, c)| "аоуыэяёюие".contains(*c)) {
                    Some((i, c)) => {
                        let end = i + c.len_utf8();
                        format!("{}\u{301}{}", &word[..end], &word[end..])
                    }
                    None => word.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" "))
        })
    }

    struct Repeating(Vec<String>);

    impl ArticleSource for Repeating {
        fn fetch_random(&mut self) -> std::result::Result<Vec<String>, SourceError> {
            Ok(self.0.clone())
        }
    }

    fn config() -> GeneratorConfig {
        GeneratorConfig::builder()
            .words_per_sentence(2, 2)
            .execution_mode(ExecutionMode::Sequential)
            .build()
            .unwrap()
    }

    #[test]
    fn test_round_yields_marked_pairs() {
        let mut generator = Generator::with_seed(config(), first_vowel(), 3).unwrap();
        let candidates = generator.round(&["кот спал дома тихо".to_string()]);
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.contains('\u{301}')));
    }

    #[test]
    fn test_zero_amount() {
        let mut generator = Generator::with_seed(config(), first_vowel(), 0).unwrap();
        let mut source = Repeating(vec![]);
        assert!(generator.generate(&mut source, 0).unwrap().is_empty());
    }

    #[test]
    fn test_idle_rounds_limit() {
        let config = GeneratorConfig {
            max_idle_rounds: Some(3),
            ..config()
        };
        let mut generator = Generator::with_seed(config, first_vowel(), 0).unwrap();
        // Same article every round: after the first, nothing new appears
        let mut source = Repeating(vec!["кот спал дома тихо".to_string()]);

        match generator.generate(&mut source, 10) {
            Err(EngineError::SourceExhausted { rounds, collected }) => {
                assert_eq!(rounds, 3);
                assert_eq!(collected, 2);
            }
            other => panic!("Expected SourceExhausted, got {other:?}"),
        }
    }
}

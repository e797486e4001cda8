//! Configuration types for the engine

use crate::{
    error::{EngineError, Result},
    executor::ExecutionMode,
};
use dialectic_core::Profile;
use std::sync::Arc;

/// Default values for [`GeneratorConfig`]
pub mod defaults {
    /// Words at or above this many characters are discarded
    pub const MAX_WORD_LEN: usize = 40;
    /// Fewest words in a generated sentence
    pub const MIN_WORDS: usize = 2;
    /// Most words in a generated sentence
    pub const MAX_WORDS: usize = 4;
    /// Largest request sent to the accentor, in characters
    pub const BATCH_CHAR_BUDGET: usize = 10_000;
    /// Paragraph count from which adaptive mode renders in parallel
    pub const PARALLEL_THRESHOLD: usize = 32;
    /// Language profile code
    pub const LANGUAGE: &str = "ru";
}

/// Toggles for the four formatter stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Send text through the accentor
    pub accents: bool,
    /// Mark paired consonants before soft vowels
    pub softness: bool,
    /// Replace unpalatalized soft vowels with glide digraphs
    pub iotation: bool,
    /// Turn punctuation into pause markers
    pub pauses: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::all()
    }
}

impl FormatOptions {
    /// Every stage enabled
    pub fn all() -> Self {
        Self {
            accents: true,
            softness: true,
            iotation: true,
            pauses: true,
        }
    }

    /// Every stage disabled
    pub fn none() -> Self {
        Self {
            accents: false,
            softness: false,
            iotation: false,
            pauses: false,
        }
    }
}

/// Generator configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Language profile code
    pub language: String,
    /// Words with this many characters or more are discarded
    pub max_word_len: usize,
    /// Fewest words per sentence
    pub min_words: usize,
    /// Most words per sentence
    pub max_words: usize,
    /// Largest accentor request in characters
    pub batch_char_budget: usize,
    /// How paragraphs of a round are rendered
    pub execution_mode: ExecutionMode,
    /// Paragraph count from which adaptive mode goes parallel
    pub parallel_threshold: usize,
    /// Consecutive rounds without a new sentence before giving up (None = never)
    pub max_idle_rounds: Option<usize>,
    /// Formatter stage toggles
    pub format: FormatOptions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            language: defaults::LANGUAGE.to_string(),
            max_word_len: defaults::MAX_WORD_LEN,
            min_words: defaults::MIN_WORDS,
            max_words: defaults::MAX_WORDS,
            batch_char_budget: defaults::BATCH_CHAR_BUDGET,
            execution_mode: ExecutionMode::Adaptive,
            parallel_threshold: defaults::PARALLEL_THRESHOLD,
            max_idle_rounds: None,
            format: FormatOptions::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a builder starting from the defaults
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }

    /// Check the numeric bounds
    pub fn validate(&self) -> Result<()> {
        if self.min_words == 0 {
            return Err(EngineError::ConfigError(
                "min_words must be at least 1".to_string(),
            ));
        }
        if self.min_words > self.max_words {
            return Err(EngineError::ConfigError(format!(
                "min_words ({}) exceeds max_words ({})",
                self.min_words, self.max_words
            )));
        }
        if self.max_word_len == 0 {
            return Err(EngineError::ConfigError(
                "max_word_len must be positive".to_string(),
            ));
        }
        if self.batch_char_budget == 0 {
            return Err(EngineError::ConfigError(
                "batch_char_budget must be positive".to_string(),
            ));
        }
        if self.max_idle_rounds == Some(0) {
            return Err(EngineError::ConfigError(
                "max_idle_rounds must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Load the language profile named by this configuration
    pub fn load_profile(&self) -> Result<Arc<Profile>> {
        Ok(Profile::from_code(&self.language)?)
    }
}

/// Builder for [`GeneratorConfig`]
#[derive(Debug, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language profile
    pub fn language<S: Into<String>>(mut self, language: S) -> Self {
        self.config.language = language.into();
        self
    }

    /// Set the word length limit
    pub fn max_word_len(mut self, len: usize) -> Self {
        self.config.max_word_len = len;
        self
    }

    /// Set the sentence length range in words
    pub fn words_per_sentence(mut self, min: usize, max: usize) -> Self {
        self.config.min_words = min;
        self.config.max_words = max;
        self
    }

    /// Set the accentor request budget
    pub fn batch_char_budget(mut self, budget: usize) -> Self {
        self.config.batch_char_budget = budget;
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.execution_mode = mode;
        self
    }

    /// Set the adaptive threshold
    pub fn parallel_threshold(mut self, paragraphs: usize) -> Self {
        self.config.parallel_threshold = paragraphs;
        self
    }

    /// Give up after this many rounds without a new sentence
    pub fn max_idle_rounds(mut self, rounds: usize) -> Self {
        self.config.max_idle_rounds = Some(rounds);
        self
    }

    /// Set the formatter stage toggles
    pub fn format(mut self, options: FormatOptions) -> Self {
        self.config.format = options;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<GeneratorConfig> {
        self.config.validate()?;

        // Check if language is supported
        self.config.load_profile()?;

        Ok(self.config)
    }
}

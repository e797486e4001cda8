//! Phonological formatting
//!
//! Four ordered stages rewrite flat text: accent acquisition through the
//! [`Accentor`], softness marking, iotation and pause restructuring. Each
//! stage can be switched off with [`FormatOptions`].

use crate::{
    accentor::Accentor,
    config::FormatOptions,
    error::{EngineError, Result},
};
use dialectic_core::Profile;
use regex::Regex;
use std::sync::Arc;

/// Punctuation turned into a short pause
const SHORT_PAUSE_MARK: char = ',';

/// Rewrites text into its annotated phonological form
pub struct PhonologicalFormatter {
    profile: Arc<Profile>,
    accentor: Arc<dyn Accentor>,
    options: FormatOptions,
    sentence_split: Regex,
}

impl std::fmt::Debug for PhonologicalFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhonologicalFormatter")
            .field("profile", &self.profile.code())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl PhonologicalFormatter {
    /// Create a formatter with every stage enabled
    pub fn new(profile: Arc<Profile>, accentor: Arc<dyn Accentor>) -> Result<Self> {
        let marks: String = profile
            .ending_marks()
            .iter()
            .map(|ch| regex::escape(&ch.to_string()))
            .collect();
        if marks.is_empty() {
            return Err(EngineError::ConfigError(
                "profile defines no ending marks".to_string(),
            ));
        }
        let sentence_split = Regex::new(&format!(r"[{marks}]+\s+"))
            .map_err(|e| EngineError::ConfigError(format!("Invalid sentence split: {e}")))?;

        Ok(Self {
            profile,
            accentor,
            options: FormatOptions::default(),
            sentence_split,
        })
    }

    /// Replace the stage toggles
    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Current stage toggles
    pub fn options(&self) -> FormatOptions {
        self.options
    }

    /// Run the enabled stages over `text`.
    ///
    /// Never fails. The result is empty when the accentor fails or when
    /// nothing survives the alphabet filter.
    pub fn format(&self, text: &str) -> String {
        let mut text = if self.options.accents {
            self.accent(text)
        } else {
            text.to_string()
        };
        if text.is_empty() {
            return text;
        }

        if self.options.softness {
            text = self.mark_softness(&text);
        }
        if self.options.iotation {
            text = self.iotate(&text);
        }
        if self.options.pauses {
            text = self.restructure_pauses(&text);
        }

        collapse_whitespace(&text)
    }

    /// Stage 1: clean the words and have the accentor stress them
    pub fn accent(&self, text: &str) -> String {
        let decomposed = self.decompose_stress(text);

        let words: Vec<String> = decomposed
            .split_whitespace()
            .map(|word| {
                word.chars()
                    .filter(|&ch| self.profile.is_allowed(ch))
                    .collect::<String>()
            })
            .filter(|word| !word.is_empty())
            .collect();
        if words.is_empty() {
            return String::new();
        }

        match self.accentor.accent(&words.join(" ")) {
            Ok(accented) => accented,
            Err(e) => {
                log::warn!("Accentor failed, dropping batch: {e}");
                String::new()
            }
        }
    }

    /// Stage 2: insert the softness marker between a paired consonant and a soft vowel
    pub fn mark_softness(&self, text: &str) -> String {
        let marker = self.profile.softness_marker();
        let mut out = String::with_capacity(text.len() + text.len() / 8);
        let mut previous = None;

        for ch in text.chars() {
            if let Some(prev) = previous {
                if self.profile.is_paired_consonant(prev) && self.profile.is_soft_vowel(ch) {
                    out.push(marker);
                }
            }
            out.push(ch);
            previous = Some(ch);
        }
        out
    }

    /// Stage 3: replace soft vowels not preceded by a consonant with glide and hard vowel
    ///
    /// Combining marks and softness markers are transparent when looking
    /// back for the preceding character; a sign always lets the next soft
    /// vowel iotate. The hard vowel is written lowercase.
    pub fn iotate(&self, text: &str) -> String {
        let marker = self.profile.softness_marker();
        let mut out = String::with_capacity(text.len() + text.len() / 8);
        let mut after_consonant = false;

        for ch in text.chars() {
            match self.profile.iotation_of(ch) {
                Some((glide, hard)) if !after_consonant => {
                    out.push(glide);
                    out.push(hard);
                }
                _ => out.push(ch),
            }

            if self.profile.is_sign(ch) {
                after_consonant = false;
            } else if ch != marker && !self.profile.is_combining_mark(ch) {
                after_consonant = self.profile.is_consonant(ch);
            }
        }
        out
    }

    /// Stage 4: commas become short pauses, sentences are joined by long pauses
    pub fn restructure_pauses(&self, text: &str) -> String {
        let short = format!(" {} ", self.profile.short_pause());
        let long = format!(" {} ", self.profile.long_pause());

        let with_short = text.replace(SHORT_PAUSE_MARK, &short);
        self.sentence_split
            .split(&with_short)
            .map(collapse_whitespace)
            .filter(|fragment| !fragment.is_empty())
            .map(|fragment| self.capitalize(&fragment))
            .collect::<Vec<_>>()
            .join(long.as_str())
    }

    /// Decompose only characters whose canonical decomposition carries the stress mark
    fn decompose_stress(&self, text: &str) -> String {
        let stress = self.profile.stress_mark();
        let mut out = String::with_capacity(text.len());
        let mut buffer = Vec::with_capacity(4);

        for ch in text.chars() {
            buffer.clear();
            unicode_normalization::char::decompose_canonical(ch, |c| buffer.push(c));
            if buffer.contains(&stress) {
                out.extend(buffer.iter());
            } else {
                out.push(ch);
            }
        }
        out
    }

    /// Uppercase the first letter when it belongs to the profile alphabet.
    ///
    /// A fragment opening with the iotation glide is left as it is.
    fn capitalize(&self, fragment: &str) -> String {
        match fragment.char_indices().find(|&(_, ch)| ch.is_alphabetic()) {
            Some((i, ch)) if self.profile.is_letter(ch) => {
                let mut out = String::with_capacity(fragment.len());
                out.push_str(&fragment[..i]);
                out.extend(ch.to_uppercase());
                out.push_str(&fragment[i + ch.len_utf8()..]);
                out
            }
            _ => fragment.to_string(),
        }
    }
}

/// Collapse whitespace runs to single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
